//! Authentication module - strategies, API access and API keys

mod api;
mod commands;
mod models;

pub use commands::{run_api_command, run_api_keys_command, run_auth_strategies_command};
pub use models::{ActiveStrategy, ApiKey, StrategyInput, StrategyModule};
