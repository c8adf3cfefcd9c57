//! State file I/O

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::defaults;
use crate::error::{Result, WikiError};

/// Last known spec of one managed resource
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct StateEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub spec: Value,
}

/// Everything applied to one site, keyed by `<type>.<name>`
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct StateFile {
    pub version: u32,
    pub site: String,
    #[serde(default)]
    pub resources: BTreeMap<String, StateEntry>,
}

impl StateFile {
    pub fn new(site: &str) -> Self {
        Self {
            version: defaults::STATE_VERSION,
            site: site.to_string(),
            resources: BTreeMap::new(),
        }
    }

    pub fn get(&self, address: &str) -> Option<&StateEntry> {
        self.resources.get(address)
    }

    pub fn insert(&mut self, address: &str, kind: &str, spec: Value) {
        self.resources.insert(
            address.to_string(),
            StateEntry {
                kind: kind.to_string(),
                spec,
            },
        );
    }

    pub fn remove(&mut self, address: &str) -> Option<StateEntry> {
        self.resources.remove(address)
    }
}

/// Split `<type>.<name>` at the first dot
pub fn parse_address(address: &str) -> Result<(&str, &str)> {
    match address.split_once('.') {
        Some((kind, name)) if !kind.is_empty() && !name.is_empty() => Ok((kind, name)),
        _ => Err(WikiError::Validation(format!(
            "address '{}' must have the form <type>.<name>",
            address
        ))),
    }
}

/// Handles reading and writing the state file
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the state for `site`.
    /// A missing file is an empty state; a file recorded for another site is an error.
    pub fn load(&self, site: &str) -> Result<StateFile> {
        if !self.path.exists() {
            return Ok(StateFile::new(site));
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            WikiError::State(format!(
                "Failed to read state file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let state: StateFile = serde_json::from_str(&content).map_err(|e| {
            WikiError::State(format!(
                "Failed to parse state file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        if state.version > defaults::STATE_VERSION {
            return Err(WikiError::State(format!(
                "State file {} has version {}; this wikictl understands up to {}",
                self.path.display(),
                state.version,
                defaults::STATE_VERSION
            )));
        }
        if state.site != site {
            return Err(WikiError::State(format!(
                "State file {} belongs to {}, not {}",
                self.path.display(),
                state.site,
                site
            )));
        }
        Ok(state)
    }

    /// Save the state to disk.
    /// Uses atomic write (tmp file + rename) and creates parent dir if needed.
    pub fn save(&self, state: &StateFile) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                WikiError::State(format!(
                    "Failed to create state directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let json = serde_json::to_string_pretty(state)
            .map_err(|e| WikiError::State(format!("Failed to serialize state: {}", e)))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, &json).map_err(|e| {
            WikiError::State(format!(
                "Failed to write temp state file {}: {}",
                tmp_path.display(),
                e
            ))
        })?;

        // State may hold API key secrets
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&tmp_path, permissions).map_err(|e| {
                WikiError::State(format!("Failed to set permissions on state file: {}", e))
            })?;
        }

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            WikiError::State(format!(
                "Failed to rename temp state file to {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    const SITE: &str = "https://wiki.example.com";

    fn test_store(dir: &TempDir) -> StateStore {
        StateStore::new(dir.path().join(".wikictl").join("state.json"))
    }

    #[test]
    fn test_load_missing_file_returns_empty_state() {
        let dir = TempDir::new().unwrap();
        let state = test_store(&dir).load(SITE).unwrap();
        assert_eq!(state.site, SITE);
        assert_eq!(state.version, defaults::STATE_VERSION);
        assert!(state.resources.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        let mut state = StateFile::new(SITE);
        state.insert("group.editors", "group", json!({ "id": 7, "name": "Editors" }));
        store.save(&state).unwrap();

        let loaded = store.load(SITE).unwrap();
        assert_eq!(loaded, state);
        assert_eq!(loaded.get("group.editors").unwrap().kind, "group");
        assert!(!dir.path().join(".wikictl").join("state.json.tmp").exists());
    }

    #[test]
    fn test_load_other_site_errors() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        store.save(&StateFile::new(SITE)).unwrap();

        let err = store.load("https://other.example.com").unwrap_err().to_string();
        assert!(err.contains("belongs to https://wiki.example.com"));
    }

    #[test]
    fn test_load_corrupt_json_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not valid json!!!").unwrap();
        let err = StateStore::new(path).load(SITE).unwrap_err().to_string();
        assert!(err.contains("Failed to parse state file"));
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address("page.home").unwrap(), ("page", "home"));
        assert!(parse_address("page").is_err());
        assert!(parse_address(".home").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_save_sets_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        store.save(&StateFile::new(SITE)).unwrap();

        let path = dir.path().join(".wikictl").join("state.json");
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
