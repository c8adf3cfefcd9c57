//! Localization data models

use serde::{Deserialize, Serialize};

use crate::wiki::null_as_default;

fn default_true() -> bool {
    true
}

/// Site locale settings (`localization.config`)
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LocaleConfig {
    pub locale: String,
    #[serde(default = "default_true")]
    pub auto_update: bool,
    #[serde(default)]
    pub namespacing: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub namespaces: Vec<String>,
}

impl LocaleConfig {
    /// Locales to download before applying: namespaces first, then the main locale
    pub fn locales_to_install(&self) -> Vec<&str> {
        let mut install: Vec<&str> = self.namespaces.iter().map(String::as_str).collect();
        if !install.contains(&self.locale.as_str()) {
            install.push(&self.locale);
        }
        install
    }
}

/// Locale available for download
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Locale {
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub native_name: String,
    #[serde(default)]
    pub availability: i64,
    #[serde(default)]
    pub is_installed: bool,
    #[serde(rename = "isRTL", default)]
    pub is_rtl: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub install_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
}

/// Locale settings together with the locale catalog
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Localization {
    pub config: LocaleConfig,
    pub locales: Vec<Locale>,
}
