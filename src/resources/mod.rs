//! Managed resource adapters
//!
//! Each managed resource type maps Create/Read/Update/Delete onto Wiki.js
//! GraphQL calls through the [`Resource`] trait. The engine only sees JSON
//! specs; [`ResourceType`] dispatches those to the typed adapters.

mod api;
mod auth_strategies;
mod group;
mod localization;
mod page;
mod renderers;
mod search_engines;
mod site_config;
mod theme_config;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::engine::merge_prior;
use crate::error::{Result, WikiError};
use crate::wiki::WikiClient;

pub use api::{Api, ApiKey, ApiKeySpec, ApiSpec};
pub use auth_strategies::{AuthStrategies, AuthStrategiesSpec, AuthStrategySpec};
pub use group::{Group, GroupSpec, ManagedSystemGroup, ManagedSystemGroupSpec, PageRuleSpec};
pub use localization::Localization;
pub use page::{Page, PageSpec};
pub use renderers::{RendererSpec, Renderers, RenderersSpec};
pub use search_engines::{SearchEngineSpec, SearchEngines, SearchEnginesSpec};
pub use site_config::SiteConfig;
pub use theme_config::ThemeConfig;

/// Result of reading a resource back from Wiki.js
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome<M> {
    Present(M),
    /// The object no longer exists and should leave the state
    Gone,
}

/// Result of deleting a resource
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted,
    /// Settings without a delete operation are only dropped from the state
    Forgotten { warning: String },
}

/// Model after a successful create or update, with non-fatal warnings
#[derive(Debug, Clone, PartialEq)]
pub struct Applied<M> {
    pub model: M,
    pub warnings: Vec<String>,
}

impl<M> Applied<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            warnings: Vec::new(),
        }
    }
}

/// Create/Read/Update/Delete adapter of one managed resource type
///
/// Computed fields are `Option`s that stay `None` in a plan until the server
/// assigns them. Optional inputs that must not inherit a prior value are
/// skipped when serializing.
#[allow(async_fn_in_trait)]
pub trait Resource {
    /// Type name used in manifests and state addresses
    const TYPE_NAME: &'static str;

    type Model: Serialize + DeserializeOwned + Clone + PartialEq + std::fmt::Debug;

    /// Check a model before any network call
    fn validate(_model: &Self::Model) -> Result<()> {
        Ok(())
    }

    /// Bring a model into canonical form (ordering of set-like fields)
    fn normalize(_model: &mut Self::Model) {}

    /// Whether the change from `prior` to `plan` needs delete + create
    fn requires_replace(_prior: &Self::Model, _plan: &Self::Model) -> bool {
        false
    }

    /// Minimal model for adopting an existing object by id
    fn import(_id: i64) -> Option<Self::Model> {
        None
    }

    async fn create(client: &WikiClient, plan: Self::Model) -> Result<Applied<Self::Model>>;

    async fn read(client: &WikiClient, prior: &Self::Model) -> Result<ReadOutcome<Self::Model>>;

    async fn update(
        client: &WikiClient,
        prior: &Self::Model,
        plan: Self::Model,
    ) -> Result<Applied<Self::Model>>;

    async fn delete(client: &WikiClient, state: &Self::Model) -> Result<DeleteOutcome>;
}

/// Warning text for settings that are only dropped from the state
pub(crate) fn forget_warning(what: &str) -> DeleteOutcome {
    DeleteOutcome::Forgotten {
        warning: format!(
            "{} is only updated in place; it was removed from the state and Wiki.js was not changed",
            what
        ),
    }
}

/// How a desired spec relates to the refreshed state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diff {
    NoChange,
    Update,
    Replace,
}

/// Every managed resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    AuthStrategies,
    Renderers,
    SearchEngines,
    Group,
    ManagedSystemGroup,
    Page,
    SiteConfig,
    ThemeConfig,
    Localization,
    Api,
    ApiKey,
}

macro_rules! dispatch {
    ($kind:expr, $func:ident($($arg:expr),*)) => {
        match $kind {
            ResourceType::AuthStrategies => $func::<AuthStrategies>($($arg),*),
            ResourceType::Renderers => $func::<Renderers>($($arg),*),
            ResourceType::SearchEngines => $func::<SearchEngines>($($arg),*),
            ResourceType::Group => $func::<Group>($($arg),*),
            ResourceType::ManagedSystemGroup => $func::<ManagedSystemGroup>($($arg),*),
            ResourceType::Page => $func::<Page>($($arg),*),
            ResourceType::SiteConfig => $func::<SiteConfig>($($arg),*),
            ResourceType::ThemeConfig => $func::<ThemeConfig>($($arg),*),
            ResourceType::Localization => $func::<Localization>($($arg),*),
            ResourceType::Api => $func::<Api>($($arg),*),
            ResourceType::ApiKey => $func::<ApiKey>($($arg),*),
        }
    };
}

macro_rules! dispatch_async {
    ($kind:expr, $func:ident($($arg:expr),*)) => {
        match $kind {
            ResourceType::AuthStrategies => $func::<AuthStrategies>($($arg),*).await,
            ResourceType::Renderers => $func::<Renderers>($($arg),*).await,
            ResourceType::SearchEngines => $func::<SearchEngines>($($arg),*).await,
            ResourceType::Group => $func::<Group>($($arg),*).await,
            ResourceType::ManagedSystemGroup => $func::<ManagedSystemGroup>($($arg),*).await,
            ResourceType::Page => $func::<Page>($($arg),*).await,
            ResourceType::SiteConfig => $func::<SiteConfig>($($arg),*).await,
            ResourceType::ThemeConfig => $func::<ThemeConfig>($($arg),*).await,
            ResourceType::Localization => $func::<Localization>($($arg),*).await,
            ResourceType::Api => $func::<Api>($($arg),*).await,
            ResourceType::ApiKey => $func::<ApiKey>($($arg),*).await,
        }
    };
}

impl ResourceType {
    pub const ALL: [ResourceType; 11] = [
        ResourceType::AuthStrategies,
        ResourceType::Renderers,
        ResourceType::SearchEngines,
        ResourceType::Group,
        ResourceType::ManagedSystemGroup,
        ResourceType::Page,
        ResourceType::SiteConfig,
        ResourceType::ThemeConfig,
        ResourceType::Localization,
        ResourceType::Api,
        ResourceType::ApiKey,
    ];

    /// Look up a type by its manifest name
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|k| k.name()).collect();
                WikiError::Manifest(format!(
                    "unknown resource type '{}' (expected one of: {})",
                    name,
                    known.join(", ")
                ))
            })
    }

    pub fn name(&self) -> &'static str {
        dispatch!(self, type_name())
    }

    /// Settings whose delete only drops them from the state
    pub fn forgets_on_delete(&self) -> bool {
        matches!(
            self,
            ResourceType::AuthStrategies
                | ResourceType::Renderers
                | ResourceType::SearchEngines
                | ResourceType::ManagedSystemGroup
                | ResourceType::SiteConfig
                | ResourceType::ThemeConfig
                | ResourceType::Localization
        )
    }

    /// Parse, canonicalize and validate a manifest spec
    pub fn normalize(&self, spec: &Value) -> Result<Value> {
        dispatch!(self, normalize_spec(spec))
    }

    /// Classify the change from a refreshed state entry to a normalized spec
    pub fn diff(&self, prior: &Value, desired: &Value) -> Result<Diff> {
        dispatch!(self, diff_spec(prior, desired))
    }

    /// Spec of an object adopted by id, if this type supports import
    pub fn import(&self, id: i64) -> Option<Value> {
        dispatch!(self, import_spec(id))
    }

    pub async fn read(&self, client: &WikiClient, state: &Value) -> Result<Option<Value>> {
        dispatch_async!(self, read_spec(client, state))
    }

    pub async fn create(&self, client: &WikiClient, desired: &Value) -> Result<Applied<Value>> {
        dispatch_async!(self, create_spec(client, desired))
    }

    pub async fn update(
        &self,
        client: &WikiClient,
        prior: &Value,
        desired: &Value,
    ) -> Result<Applied<Value>> {
        dispatch_async!(self, update_spec(client, prior, desired))
    }

    pub async fn delete(&self, client: &WikiClient, state: &Value) -> Result<DeleteOutcome> {
        dispatch_async!(self, delete_spec(client, state))
    }
}

fn type_name<R: Resource>() -> &'static str {
    R::TYPE_NAME
}

fn parse<R: Resource>(spec: &Value) -> Result<R::Model> {
    serde_json::from_value(spec.clone())
        .map_err(|e| WikiError::Manifest(format!("invalid {} spec: {}", R::TYPE_NAME, e)))
}

fn applied_spec<R: Resource>(applied: Applied<R::Model>) -> Result<Applied<Value>> {
    Ok(Applied {
        model: serde_json::to_value(&applied.model)?,
        warnings: applied.warnings,
    })
}

fn normalize_spec<R: Resource>(spec: &Value) -> Result<Value> {
    let mut model = parse::<R>(spec)?;
    R::normalize(&mut model);
    R::validate(&model)?;
    Ok(serde_json::to_value(&model)?)
}

fn diff_spec<R: Resource>(prior: &Value, desired: &Value) -> Result<Diff> {
    let mut prior = parse::<R>(prior)?;
    R::normalize(&mut prior);
    let mut plan = parse::<R>(&merge_prior(desired.clone(), &serde_json::to_value(&prior)?))?;
    R::normalize(&mut plan);

    if R::requires_replace(&prior, &plan) {
        Ok(Diff::Replace)
    } else if plan == prior {
        Ok(Diff::NoChange)
    } else {
        Ok(Diff::Update)
    }
}

fn import_spec<R: Resource>(id: i64) -> Option<Value> {
    R::import(id).and_then(|model| serde_json::to_value(&model).ok())
}

async fn read_spec<R: Resource>(client: &WikiClient, state: &Value) -> Result<Option<Value>> {
    let prior = parse::<R>(state)?;
    match R::read(client, &prior).await? {
        ReadOutcome::Present(model) => Ok(Some(serde_json::to_value(&model)?)),
        ReadOutcome::Gone => Ok(None),
    }
}

async fn create_spec<R: Resource>(client: &WikiClient, desired: &Value) -> Result<Applied<Value>> {
    let plan = parse::<R>(desired)?;
    R::validate(&plan)?;
    applied_spec::<R>(R::create(client, plan).await?)
}

async fn update_spec<R: Resource>(
    client: &WikiClient,
    prior: &Value,
    desired: &Value,
) -> Result<Applied<Value>> {
    let prior = parse::<R>(prior)?;
    let plan = parse::<R>(&merge_prior(desired.clone(), &serde_json::to_value(&prior)?))?;
    R::validate(&plan)?;
    applied_spec::<R>(R::update(client, &prior, plan).await?)
}

async fn delete_spec<R: Resource>(client: &WikiClient, state: &Value) -> Result<DeleteOutcome> {
    let state = parse::<R>(state)?;
    R::delete(client, &state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_forget_warning_names_the_resource() {
        let DeleteOutcome::Forgotten { warning } = forget_warning("Renderer configuration") else {
            panic!("Expected DeleteOutcome::Forgotten");
        };
        assert!(warning.starts_with("Renderer configuration is only updated in place"));
        assert!(!warning.contains("factory defaults"));
    }

    #[test]
    fn test_type_names_round_trip() {
        for kind in ResourceType::ALL {
            assert_eq!(ResourceType::from_name(kind.name()).unwrap(), kind);
        }
    }

    #[test]
    fn test_type_names() {
        let names: Vec<&str> = ResourceType::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(
            names,
            vec![
                "auth_strategies",
                "renderers",
                "search_engines",
                "group",
                "managed_system_group",
                "page",
                "site_config",
                "theme_config",
                "localization",
                "api",
                "api_key"
            ]
        );
    }

    #[test]
    fn test_unknown_type_lists_known_types() {
        match ResourceType::from_name("wiki_page").unwrap_err() {
            WikiError::Manifest(msg) => {
                assert!(msg.contains("wiki_page"));
                assert!(msg.contains("site_config"));
            }
            other => panic!("Expected WikiError::Manifest, got {:?}", other),
        }
    }

    #[test]
    fn test_diff_fills_computed_fields_from_prior() {
        let prior = json!({
            "id": 7, "name": "Editors", "is_system": false, "redirect_on_login": "/",
            "permissions": ["read:pages"], "page_rules": []
        });
        let desired = ResourceType::Group
            .normalize(&json!({ "name": "Editors", "permissions": ["read:pages"] }))
            .unwrap();

        assert_eq!(ResourceType::Group.diff(&prior, &desired).unwrap(), Diff::NoChange);

        let renamed = ResourceType::Group
            .normalize(&json!({ "name": "Writers", "permissions": ["read:pages"] }))
            .unwrap();
        assert_eq!(ResourceType::Group.diff(&prior, &renamed).unwrap(), Diff::Update);
    }

    #[test]
    fn test_import_support() {
        assert!(ResourceType::Page.import(3).is_some());
        assert!(ResourceType::Group.import(3).is_some());
        assert!(ResourceType::SiteConfig.import(3).is_none());
    }
}
