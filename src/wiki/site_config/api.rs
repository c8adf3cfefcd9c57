//! Site configuration API operations

use log::debug;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::Result;
use crate::wiki::{MutationStatus, WikiClient};

use super::models::{SiteConfig, FIELDS};

#[derive(Deserialize)]
struct Data<T> {
    site: T,
}

#[derive(Deserialize)]
struct GetSiteConfig {
    config: serde_json::Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateSiteConfig {
    update_config: MutationStatus,
}

/// `site { config { ... } }` with every wire field aliased to its snake_case name
fn get_query() -> String {
    let selection: Vec<String> = FIELDS
        .iter()
        .map(|(name, wire, _)| {
            if name == wire {
                name.to_string()
            } else {
                format!("{}: {}", name, wire)
            }
        })
        .collect();
    format!(
        "query GetSiteConfig {{\n  site {{\n    config {{\n      {}\n    }}\n  }}\n}}",
        selection.join("\n      ")
    )
}

/// `site.updateConfig` taking one snake_case variable per field
fn update_mutation() -> String {
    let params: Vec<String> = FIELDS
        .iter()
        .map(|(name, _, ty)| format!("${}: {}", name, ty))
        .collect();
    let args: Vec<String> = FIELDS
        .iter()
        .map(|(name, wire, _)| format!("{}: ${}", wire, name))
        .collect();
    format!(
        "mutation UpdateSiteConfig({}) {{\n  site {{\n    updateConfig({}) {{\n      responseResult {{ succeeded errorCode slug message }}\n    }}\n  }}\n}}",
        params.join(", "),
        args.join(", ")
    )
}

impl WikiClient {
    /// Get the site configuration
    ///
    /// Fields Wiki.js reports as null take their factory defaults.
    pub async fn get_site_config(&self) -> Result<SiteConfig> {
        let data: Data<GetSiteConfig> = self
            .graphql("GetSiteConfig", &get_query(), json!({}))
            .await?;
        let mut config = data.site.config;
        config.retain(|_, v| !v.is_null());
        debug!("Fetched {} site config fields", config.len());
        Ok(serde_json::from_value(Value::Object(config))?)
    }

    /// Write every site configuration field
    pub async fn update_site_config(&self, config: &SiteConfig) -> Result<()> {
        debug!("Updating site config");
        let data: Data<UpdateSiteConfig> = self
            .graphql(
                "UpdateSiteConfig",
                &update_mutation(),
                serde_json::to_value(config)?,
            )
            .await?;
        data.site
            .update_config
            .response_result
            .ensure_succeeded("Update site config")
    }
}
