//! Theming API operations

use log::debug;
use serde::Deserialize;
use serde_json::json;

use crate::error::Result;
use crate::wiki::{MutationStatus, WikiClient};

use super::models::{Theme, ThemeConfig};

const GET_THEME_CONFIG: &str = r#"
query GetThemeConfig {
  theming {
    config {
      theme
      iconset
      dark_mode: darkMode
      toc_position: tocPosition
      inject_css: injectCSS
      inject_head: injectHead
      inject_body: injectBody
    }
  }
}"#;

const GET_THEMES: &str = r#"
query GetThemes {
  theming {
    themes { key title author }
  }
}"#;

const SET_THEME_CONFIG: &str = r#"
mutation SetThemeConfig($theme: String!, $iconset: String!, $dark_mode: Boolean!, $toc_position: String, $inject_css: String, $inject_head: String, $inject_body: String) {
  theming {
    setConfig(theme: $theme, iconset: $iconset, darkMode: $dark_mode, tocPosition: $toc_position, injectCSS: $inject_css, injectHead: $inject_head, injectBody: $inject_body) {
      responseResult { succeeded errorCode slug message }
    }
  }
}"#;

#[derive(Deserialize)]
struct Data<T> {
    theming: T,
}

#[derive(Deserialize)]
struct GetThemeConfig {
    config: ThemeConfig,
}

#[derive(Deserialize)]
struct GetThemes {
    #[serde(default, deserialize_with = "crate::wiki::null_as_default")]
    themes: Vec<Theme>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetThemeConfig {
    set_config: MutationStatus,
}

impl WikiClient {
    /// Get the active theme settings
    pub async fn get_theme_config(&self) -> Result<ThemeConfig> {
        let data: Data<GetThemeConfig> = self
            .graphql("GetThemeConfig", GET_THEME_CONFIG, json!({}))
            .await?;
        Ok(data.theming.config)
    }

    /// List installed themes
    pub async fn get_themes(&self) -> Result<Vec<Theme>> {
        let data: Data<GetThemes> = self
            .graphql("GetThemes", GET_THEMES, json!({}))
            .await?;
        debug!("Fetched {} themes", data.theming.themes.len());
        Ok(data.theming.themes)
    }

    /// Replace the theme settings
    pub async fn set_theme_config(&self, config: &ThemeConfig) -> Result<()> {
        debug!("Setting theme '{}'", config.theme);
        let data: Data<SetThemeConfig> = self
            .graphql(
                "SetThemeConfig",
                SET_THEME_CONFIG,
                serde_json::to_value(config)?,
            )
            .await?;
        data.theming
            .set_config
            .response_result
            .ensure_succeeded("Set theme config")
    }
}
