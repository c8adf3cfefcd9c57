//! Theming data models

use serde::{Deserialize, Serialize};

use crate::config::theme_defaults;
use crate::error::{Result, WikiError};

/// Active theme settings (`theming.config`)
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub theme: String,
    pub iconset: String,
    pub dark_mode: bool,
    pub toc_position: String,
    #[serde(deserialize_with = "crate::wiki::null_as_default")]
    pub inject_css: String,
    #[serde(deserialize_with = "crate::wiki::null_as_default")]
    pub inject_head: String,
    #[serde(deserialize_with = "crate::wiki::null_as_default")]
    pub inject_body: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            theme: theme_defaults::THEME.to_string(),
            iconset: theme_defaults::ICONSET.to_string(),
            dark_mode: false,
            toc_position: theme_defaults::TOC_POSITION.to_string(),
            inject_css: String::new(),
            inject_head: String::new(),
            inject_body: String::new(),
        }
    }
}

impl ThemeConfig {
    /// Check the enumerated settings against the values Wiki.js accepts
    pub fn validate(&self) -> Result<()> {
        if !theme_defaults::ICONSETS.contains(&self.iconset.as_str()) {
            return Err(WikiError::Validation(format!(
                "iconset '{}' is not one of {}",
                self.iconset,
                theme_defaults::ICONSETS.join(", ")
            )));
        }
        if !theme_defaults::TOC_POSITIONS.contains(&self.toc_position.as_str()) {
            return Err(WikiError::Validation(format!(
                "toc_position '{}' is not one of {}",
                self.toc_position,
                theme_defaults::TOC_POSITIONS.join(", ")
            )));
        }
        Ok(())
    }
}

/// Installed theme
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Theme {
    pub key: String,
    #[serde(default, deserialize_with = "crate::wiki::null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "crate::wiki::null_as_default")]
    pub author: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(ThemeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_iconset() {
        let config = ThemeConfig {
            iconset: "octicons".to_string(),
            ..Default::default()
        };
        match config.validate().unwrap_err() {
            WikiError::Validation(msg) => assert!(msg.contains("octicons")),
            other => panic!("Expected WikiError::Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_toc_position() {
        let config = ThemeConfig {
            toc_position: "top".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
