//! Localization module - site locale, namespaces and locale catalog

mod api;
mod commands;
mod models;

pub use commands::run_localization_command;
pub use models::{Locale, LocaleConfig, Localization};
