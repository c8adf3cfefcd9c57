//! Row layouts for listed records

use std::collections::BTreeMap;

use serde::Serialize;

use super::Tabular;
use crate::codec::decode_config_map;
use crate::error::WikiError;
use crate::wiki::authentication::{ActiveStrategy, ApiKey};
use crate::wiki::groups::GroupSummary;
use crate::wiki::localization::Locale;
use crate::wiki::rendering::Renderer;
use crate::wiki::search::SearchEngine;
use crate::wiki::theming::Theme;

/// Render a decoded config map as `key=value` pairs in key order
fn config_cell(config: &BTreeMap<String, String>) -> String {
    config
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Authentication strategy with its config decoded to plain strings
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AuthStrategyView {
    pub key: String,
    pub strategy: String,
    pub display_name: String,
    pub order: i64,
    pub is_enabled: bool,
    pub self_registration: bool,
    pub domain_whitelist: Vec<String>,
    pub auto_enroll_groups: Vec<i64>,
    pub config: BTreeMap<String, String>,
}

impl TryFrom<&ActiveStrategy> for AuthStrategyView {
    type Error = WikiError;

    fn try_from(strategy: &ActiveStrategy) -> Result<Self, Self::Error> {
        Ok(Self {
            key: strategy.key.clone(),
            strategy: strategy.strategy.key.clone(),
            display_name: strategy.display_name.clone(),
            order: strategy.order,
            is_enabled: strategy.is_enabled,
            self_registration: strategy.self_registration,
            domain_whitelist: strategy.domain_whitelist.clone(),
            auto_enroll_groups: strategy.auto_enroll_groups.clone(),
            config: decode_config_map(&strategy.config)?,
        })
    }
}

impl Tabular for AuthStrategyView {
    fn headers() -> Vec<&'static str> {
        vec!["ORDER", "KEY", "STRATEGY", "NAME", "ENABLED", "SELF-REGISTRATION", "CONFIG"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.order.to_string(),
            self.key.clone(),
            self.strategy.clone(),
            self.display_name.clone(),
            self.is_enabled.to_string(),
            self.self_registration.to_string(),
            config_cell(&self.config),
        ]
    }
}

/// Renderer or search engine with its config decoded to plain strings
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ModuleView {
    pub key: String,
    pub title: String,
    pub is_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    pub config: BTreeMap<String, String>,
}

impl TryFrom<&Renderer> for ModuleView {
    type Error = WikiError;

    fn try_from(renderer: &Renderer) -> Result<Self, Self::Error> {
        Ok(Self {
            key: renderer.key.clone(),
            title: renderer.title.clone(),
            is_enabled: renderer.is_enabled,
            is_available: None,
            config: decode_config_map(&renderer.config)?,
        })
    }
}

impl TryFrom<&SearchEngine> for ModuleView {
    type Error = WikiError;

    fn try_from(engine: &SearchEngine) -> Result<Self, Self::Error> {
        Ok(Self {
            key: engine.key.clone(),
            title: engine.title.clone(),
            is_enabled: engine.is_enabled,
            is_available: Some(engine.available()),
            config: decode_config_map(&engine.config)?,
        })
    }
}

impl Tabular for ModuleView {
    fn headers() -> Vec<&'static str> {
        vec!["KEY", "TITLE", "ENABLED", "AVAILABLE", "CONFIG"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.key.clone(),
            self.title.clone(),
            self.is_enabled.to_string(),
            self.is_available.map(|a| a.to_string()).unwrap_or_default(),
            config_cell(&self.config),
        ]
    }
}

impl Tabular for ApiKey {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "NAME", "KEY", "EXPIRATION", "REVOKED"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.key_short.clone(),
            self.expiration.clone(),
            self.is_revoked.to_string(),
        ]
    }
}

impl Tabular for GroupSummary {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "NAME", "SYSTEM", "USERS", "CREATED"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.is_system.to_string(),
            self.user_count.map(|c| c.to_string()).unwrap_or_default(),
            self.created_at.clone(),
        ]
    }
}

impl Tabular for Theme {
    fn headers() -> Vec<&'static str> {
        vec!["KEY", "TITLE", "AUTHOR"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.key.clone(), self.title.clone(), self.author.clone()]
    }
}

impl Tabular for Locale {
    fn headers() -> Vec<&'static str> {
        vec!["CODE", "NAME", "NATIVE NAME", "AVAILABILITY", "INSTALLED", "RTL"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.code.clone(),
            self.name.clone(),
            self.native_name.clone(),
            format!("{}%", self.availability),
            self.is_installed.to_string(),
            self.is_rtl.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::KeyValuePair;
    use crate::wiki::authentication::StrategyModule;

    #[test]
    fn test_auth_strategy_view_decodes_config() {
        let strategy = ActiveStrategy {
            key: "ldap-1".to_string(),
            strategy: StrategyModule {
                key: "ldap".to_string(),
                title: "LDAP".to_string(),
            },
            display_name: "Corporate LDAP".to_string(),
            order: 1,
            is_enabled: true,
            config: vec![
                KeyValuePair {
                    key: "url".to_string(),
                    value: r#"{"value":"ldap://ldap.example.com"}"#.to_string(),
                },
                KeyValuePair {
                    key: "tlsEnabled".to_string(),
                    value: r#"{"value":true}"#.to_string(),
                },
            ],
            ..Default::default()
        };

        let view = AuthStrategyView::try_from(&strategy).unwrap();
        assert_eq!(view.strategy, "ldap");
        assert_eq!(view.config["tlsEnabled"], "true");
        assert_eq!(
            view.row()[6],
            "tlsEnabled=true, url=ldap://ldap.example.com"
        );
    }

    #[test]
    fn test_auth_strategy_view_bad_config_names_key() {
        let strategy = ActiveStrategy {
            config: vec![KeyValuePair {
                key: "broken".to_string(),
                value: "{not json".to_string(),
            }],
            ..Default::default()
        };

        match AuthStrategyView::try_from(&strategy).unwrap_err() {
            WikiError::Decode { key, .. } => assert_eq!(key, "broken"),
            other => panic!("Expected WikiError::Decode, got {:?}", other),
        }
    }

    #[test]
    fn test_renderer_view_has_no_availability() {
        let renderer = Renderer {
            key: "markdownCore".to_string(),
            is_enabled: true,
            title: "Core".to_string(),
            ..Default::default()
        };
        let view = ModuleView::try_from(&renderer).unwrap();
        assert_eq!(view.row()[3], "");
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("is_available").is_none());
    }

    #[test]
    fn test_headers_match_row_width() {
        let key = ApiKey::default();
        assert_eq!(ApiKey::headers().len(), key.row().len());
        let group = GroupSummary::default();
        assert_eq!(GroupSummary::headers().len(), group.row().len());
        let locale = Locale::default();
        assert_eq!(Locale::headers().len(), locale.row().len());
    }
}
