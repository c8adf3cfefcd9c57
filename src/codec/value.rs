//! Config value envelopes
//!
//! Wiki.js returns every module setting as `{"value": <json>}` and parses
//! inputs from `{"v": <json>}`. Locally every setting is a string.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, WikiError};

/// Key/value pair as returned by Wiki.js (`value` holds an envelope)
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct KeyValuePair {
    pub key: String,
    pub value: String,
}

/// Key/value pair as submitted to Wiki.js mutations
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct KeyValuePairInput {
    pub key: String,
    pub value: String,
}

/// The scalar kinds a config value can take on the wire
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    /// Original textual form of the JSON number
    Number(String),
    String(String),
    /// Null, object or array
    Other(Value),
}

impl ConfigValue {
    /// Parse an envelope. `value` wins over `v`; a missing field is an empty string.
    pub fn parse(raw: &str) -> std::result::Result<Self, String> {
        let envelope: Map<String, Value> = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(format!(
                    "expected a JSON object envelope, got {}",
                    json_kind(&other)
                ))
            }
            Err(e) => return Err(e.to_string()),
        };

        let inner = match envelope.get("value").or_else(|| envelope.get("v")) {
            Some(v) => v,
            None => return Ok(ConfigValue::String(String::new())),
        };

        Ok(match inner {
            Value::Bool(b) => ConfigValue::Bool(*b),
            Value::Number(n) => ConfigValue::Number(n.to_string()),
            Value::String(s) => ConfigValue::String(s.clone()),
            other => ConfigValue::Other(other.clone()),
        })
    }

    /// Render to the string form kept in local models
    ///
    /// Non-scalar values render as compact JSON.
    pub fn render(&self) -> String {
        match self {
            ConfigValue::Bool(b) => b.to_string(),
            ConfigValue::Number(n) => n.clone(),
            ConfigValue::String(s) => s.clone(),
            ConfigValue::Other(v) => v.to_string(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Wrap a string into the `{"value": ...}` envelope
pub fn encode_value(value: &str) -> String {
    serde_json::json!({ "value": value }).to_string()
}

/// Wrap a string into the `{"v": ...}` envelope Wiki.js mutations expect
pub fn encode_input_value(value: &str) -> String {
    serde_json::json!({ "v": value }).to_string()
}

/// Decode a single envelope into its string form
pub fn decode_value(raw: &str) -> Result<String> {
    ConfigValue::parse(raw)
        .map(|v| v.render())
        .map_err(|message| WikiError::Decode {
            key: "value".to_string(),
            message,
        })
}

/// Build mutation inputs from a local config map (sorted by key)
pub fn encode_config_map(config: &BTreeMap<String, String>) -> Vec<KeyValuePairInput> {
    config
        .iter()
        .map(|(key, value)| KeyValuePairInput {
            key: key.clone(),
            value: encode_input_value(value),
        })
        .collect()
}

/// Decode every pair of an API response into a local config map
///
/// Fails on the first malformed entry; no partial map is returned.
pub fn decode_config_map(pairs: &[KeyValuePair]) -> Result<BTreeMap<String, String>> {
    let mut config = BTreeMap::new();
    for pair in pairs {
        let value = ConfigValue::parse(&pair.value).map_err(|message| WikiError::Decode {
            key: pair.key.clone(),
            message,
        })?;
        config.insert(pair.key.clone(), value.render());
    }
    Ok(config)
}
