//! Search engine data models

use serde::{Deserialize, Serialize};

use crate::codec::{KeyValuePair, KeyValuePairInput};
use crate::wiki::null_as_default;

/// Search engine module as returned by Wiki.js
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchEngine {
    pub key: String,
    pub is_enabled: bool,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_available: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub config: Vec<KeyValuePair>,
}

impl SearchEngine {
    /// Engines without an availability flag are treated as available
    pub fn available(&self) -> bool {
        self.is_available.unwrap_or(true)
    }
}

/// Submission form of a search engine
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchEngineInput {
    pub key: String,
    pub is_enabled: bool,
    pub config: Vec<KeyValuePairInput>,
}
