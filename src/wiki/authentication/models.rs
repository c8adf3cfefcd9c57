//! Authentication data models

use serde::{Deserialize, Serialize};

use crate::codec::{KeyValuePair, KeyValuePairInput, Positioned};
use crate::wiki::null_as_default;
use crate::wiki::traits::WikiResource;

/// Strategy module backing an active strategy
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct StrategyModule {
    pub key: String,
    #[serde(default)]
    pub title: String,
}

/// Configured authentication strategy instance
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveStrategy {
    pub key: String,
    pub strategy: StrategyModule,
    pub display_name: String,
    pub order: i64,
    pub is_enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub config: Vec<KeyValuePair>,
    pub self_registration: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain_whitelist: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub auto_enroll_groups: Vec<i64>,
}

impl Positioned for ActiveStrategy {
    fn position(&self) -> crate::error::Result<usize> {
        crate::codec::slot(self.order)
    }
}

/// Submission form of an active strategy
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StrategyInput {
    pub key: String,
    pub strategy_key: String,
    pub config: Vec<KeyValuePairInput>,
    pub display_name: String,
    pub order: i64,
    pub is_enabled: bool,
    pub self_registration: bool,
    pub domain_whitelist: Vec<String>,
    pub auto_enroll_groups: Vec<i64>,
}

/// API key metadata (the secret itself is only returned on creation)
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub id: i64,
    pub name: String,
    pub key_short: String,
    pub expiration: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    pub is_revoked: bool,
}

impl ApiKey {
    /// Trailing characters of the key, without the `...` display prefix
    pub fn key_suffix(&self) -> &str {
        self.key_short.trim_start_matches("...")
    }
}

impl WikiResource for ApiKey {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
