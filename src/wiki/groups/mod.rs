//! Groups module - permission groups and page rules

mod api;
mod commands;
mod models;

pub use commands::{run_group_command, run_groups_command};
pub use models::{Group, GroupSummary, GroupUpdate, PageRule, PageRuleMatch};
