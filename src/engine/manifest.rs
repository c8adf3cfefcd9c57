//! Manifest of desired resources

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, WikiError};

fn empty_spec() -> Value {
    Value::Object(Default::default())
}

/// One desired resource
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "empty_spec")]
    pub spec: Value,
}

impl ManifestEntry {
    /// State address: `<type>.<name>`
    pub fn address(&self) -> String {
        format!("{}.{}", self.kind, self.name)
    }
}

/// Desired resources, in YAML or JSON
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub resources: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            WikiError::Manifest(format!("Failed to read manifest {}: {}", path.display(), e))
        })?;
        let manifest = Self::parse(&text).map_err(|e| match e {
            WikiError::Manifest(msg) => {
                WikiError::Manifest(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;
        debug!(
            "Loaded {} resource(s) from {}",
            manifest.resources.len(),
            path.display()
        );
        Ok(manifest)
    }

    /// Parse manifest text; JSON is accepted as YAML
    pub fn parse(text: &str) -> Result<Self> {
        let mut manifest: Manifest =
            serde_yml::from_str(text).map_err(|e| WikiError::Manifest(e.to_string()))?;

        // `spec:` with no body reads as null
        for entry in &mut manifest.resources {
            if entry.spec.is_null() {
                entry.spec = empty_spec();
            }
        }
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.resources {
            if entry.name.is_empty() || entry.name.contains('.') {
                return Err(WikiError::Manifest(format!(
                    "resource name '{}' must be non-empty and must not contain '.'",
                    entry.name
                )));
            }
            if !entry.spec.is_object() {
                return Err(WikiError::Manifest(format!(
                    "spec of '{}' must be a mapping",
                    entry.address()
                )));
            }
            if !seen.insert(entry.address()) {
                return Err(WikiError::Manifest(format!(
                    "duplicate resource address '{}'",
                    entry.address()
                )));
            }
        }
        Ok(())
    }
}
