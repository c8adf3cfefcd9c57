//! Change planning

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::apply::refresh;
use super::manifest::Manifest;
use super::state::StateFile;
use crate::error::{Result, WikiError};
use crate::resources::{Diff, ResourceType};
use crate::wiki::WikiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Update,
    /// Delete, then create from the manifest spec
    Replace,
    Delete,
    /// Drop from the state without touching the site
    Forget,
    NoChange,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Create => write!(f, "create"),
            Action::Update => write!(f, "update"),
            Action::Replace => write!(f, "replace"),
            Action::Delete => write!(f, "delete"),
            Action::Forget => write!(f, "forget"),
            Action::NoChange => write!(f, "no-op"),
        }
    }
}

/// One step of a plan
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedChange {
    pub address: String,
    pub kind: ResourceType,
    pub action: Action,
    /// Normalized manifest spec; `None` for delete and forget
    pub desired: Option<Value>,
    /// Refreshed state spec; `None` for create
    pub prior: Option<Value>,
}

impl PlannedChange {
    fn removal(address: &str, kind: ResourceType, prior: &Value) -> Self {
        let action = if kind.forgets_on_delete() {
            Action::Forget
        } else {
            Action::Delete
        };
        Self {
            address: address.to_string(),
            kind,
            action,
            desired: None,
            prior: Some(prior.clone()),
        }
    }
}

/// Prefix an error message with the resource address it concerns
pub(crate) fn at_address(address: &str, err: WikiError) -> WikiError {
    match err {
        WikiError::Validation(msg) => WikiError::Validation(format!("{}: {}", address, msg)),
        WikiError::Manifest(msg) => WikiError::Manifest(format!("{}: {}", address, msg)),
        other => other,
    }
}

/// Resource type recorded for a state entry
pub(crate) fn state_kind(address: &str, kind: &str) -> Result<ResourceType> {
    ResourceType::from_name(kind)
        .map_err(|_| WikiError::State(format!("{} has unknown type '{}'", address, kind)))
}

/// Parse and validate every manifest spec, in manifest order
fn desired_specs(manifest: &Manifest) -> Result<Vec<(String, ResourceType, Value)>> {
    manifest
        .resources
        .iter()
        .map(|entry| {
            let address = entry.address();
            let kind = ResourceType::from_name(&entry.kind).map_err(|e| at_address(&address, e))?;
            let spec = kind.normalize(&entry.spec).map_err(|e| at_address(&address, e))?;
            Ok((address, kind, spec))
        })
        .collect()
}

/// Check every manifest spec without contacting Wiki.js
pub fn validate_manifest(manifest: &Manifest) -> Result<()> {
    desired_specs(manifest).map(|_| ())
}

/// Compare the manifest with the refreshed state
///
/// Every manifest spec is parsed and validated before the first network call.
/// The state is refreshed in place: entries gone from the site are dropped.
pub async fn plan(
    client: &WikiClient,
    manifest: &Manifest,
    state: &mut StateFile,
) -> Result<Vec<PlannedChange>> {
    let desired = desired_specs(manifest)?;

    refresh(client, state).await?;

    let mut changes = Vec::with_capacity(desired.len());
    for (address, kind, spec) in &desired {
        let change = match state.get(address) {
            None => PlannedChange {
                address: address.clone(),
                kind: *kind,
                action: Action::Create,
                desired: Some(spec.clone()),
                prior: None,
            },
            Some(entry) => {
                let action = match kind.diff(&entry.spec, spec)? {
                    Diff::NoChange => Action::NoChange,
                    Diff::Update => Action::Update,
                    Diff::Replace => Action::Replace,
                };
                PlannedChange {
                    address: address.clone(),
                    kind: *kind,
                    action,
                    desired: Some(spec.clone()),
                    prior: Some(entry.spec.clone()),
                }
            }
        };
        changes.push(change);
    }

    let wanted: HashSet<&str> = desired.iter().map(|(address, _, _)| address.as_str()).collect();
    for (address, entry) in &state.resources {
        if !wanted.contains(address.as_str()) {
            let kind = state_kind(address, &entry.kind)?;
            changes.push(PlannedChange::removal(address, kind, &entry.spec));
        }
    }

    Ok(changes)
}

/// Remove every state entry, in reverse address order
pub fn destroy_plan(state: &StateFile) -> Result<Vec<PlannedChange>> {
    state
        .resources
        .iter()
        .rev()
        .map(|(address, entry)| {
            let kind = state_kind(address, &entry.kind)?;
            Ok(PlannedChange::removal(address, kind, &entry.spec))
        })
        .collect()
}
