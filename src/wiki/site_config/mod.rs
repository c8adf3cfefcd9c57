//! Site configuration module - title, authentication, editor, security and upload settings

mod api;
mod commands;
mod models;

pub use commands::run_site_config_command;
pub use models::SiteConfig;
