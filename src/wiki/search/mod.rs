//! Search module - search engine selection and index

mod api;
mod commands;
mod models;

pub use commands::run_search_engines_command;
pub use models::{SearchEngine, SearchEngineInput};
