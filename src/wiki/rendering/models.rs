//! Renderer data models

use serde::{Deserialize, Serialize};

use crate::codec::{KeyValuePair, KeyValuePairInput};
use crate::wiki::null_as_default;

/// Renderer module as returned by Wiki.js
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Renderer {
    pub key: String,
    pub is_enabled: bool,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub depends_on: Option<String>,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub config: Vec<KeyValuePair>,
}

/// Submission form of a renderer
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RendererInput {
    pub key: String,
    pub is_enabled: bool,
    pub config: Vec<KeyValuePairInput>,
}
