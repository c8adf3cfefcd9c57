//! Rendering module - renderer pipeline configuration

mod api;
mod commands;
mod models;

pub use commands::run_renderers_command;
pub use models::{Renderer, RendererInput};
