//! wikictl - Declarative management of Wiki.js instances
//!
//! Reads a manifest of desired Wiki.js settings, pages and groups, compares it
//! with a local state file and the live site, and applies the difference
//! through the Wiki.js 2.x GraphQL API.
//!
//! # Example
//!
//! ```bash
//! # Show what would change
//! wikictl plan -f wiki.yaml --site https://wiki.example.com
//!
//! # Apply without a prompt
//! wikictl apply -f wiki.yaml -y
//!
//! # Adopt an existing page
//! wikictl import page.home 12
//!
//! # Inspect the site
//! wikictl get groups --filter edit -o json
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod resources;
pub mod ui;
pub mod wiki;

pub use cli::{Cli, Command, GetResource, OutputFormat};
pub use engine::{Manifest, PlannedChange, StateFile, StateStore};
pub use error::{Result, WikiError};
pub use resources::{Resource, ResourceType};
pub use wiki::{Auth, AuthResolver, Connection, SiteResolver, WikiClient};
