//! Theming module - theme selection and injected code

mod api;
mod commands;
mod models;

pub use commands::{run_theme_config_command, run_themes_command};
pub use models::{Theme, ThemeConfig};
