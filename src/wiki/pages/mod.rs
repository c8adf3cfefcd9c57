//! Pages module - page content, metadata and tags

mod api;
mod commands;
mod models;

pub use commands::run_page_command;
pub use models::{Page, PageInput, PageTag};
