//! Plan/apply engine
//!
//! Reconciles a manifest of desired resources with the state file and the
//! live site. Every step runs sequentially and the state is written after
//! each successful change.

mod apply;
mod commands;
mod manifest;
mod plan;
mod state;

use serde_json::Value;

pub use apply::{apply, import, refresh, ApplyReport};
pub use commands::{
    run_apply_command, run_destroy_command, run_import_command, run_plan_command,
    run_refresh_command,
};
pub use manifest::{Manifest, ManifestEntry};
pub use plan::{destroy_plan, plan, validate_manifest, Action, PlannedChange};
pub use state::{parse_address, StateEntry, StateFile, StateStore};

/// Fill every still-unknown (`null`) value of a plan from the prior state
///
/// Objects recurse over the plan's keys and arrays recurse index by index;
/// anything else the plan sets wins.
pub fn merge_prior(plan: Value, prior: &Value) -> Value {
    match (plan, prior) {
        (Value::Null, prior) => prior.clone(),
        (Value::Object(plan), Value::Object(prior)) => Value::Object(
            plan.into_iter()
                .map(|(key, value)| {
                    let merged = match prior.get(&key) {
                        Some(prior_value) => merge_prior(value, prior_value),
                        None => value,
                    };
                    (key, merged)
                })
                .collect(),
        ),
        (Value::Array(plan), Value::Array(prior)) => Value::Array(
            plan.into_iter()
                .enumerate()
                .map(|(i, value)| match prior.get(i) {
                    Some(prior_value) => merge_prior(value, prior_value),
                    None => value,
                })
                .collect(),
        ),
        (plan, _) => plan,
    }
}
