//! Wiki.js API client module
//!
//! This module provides typed access to the Wiki.js 2.x GraphQL API.

pub mod authentication;
mod client;
mod credentials;
pub mod groups;
pub mod localization;
pub mod pages;
pub mod rendering;
mod result;
pub mod search;
mod site;
pub mod site_config;
pub mod theming;
pub mod traits;

use serde::{Deserialize, Deserializer};

pub use client::{Connection, WikiClient};
pub use credentials::{Auth, AuthResolver};
pub use result::{MutationStatus, ResponseResult};
pub use site::SiteResolver;
pub use traits::WikiResource;

/// Deserialize an explicit `null` as the type's default
///
/// Wiki.js declares many list fields nullable and returns `null` for empty ones.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
