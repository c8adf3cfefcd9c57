//! Mutation result envelope

use serde::{Deserialize, Serialize};

use crate::error::{Result, WikiError};

/// `{succeeded, errorCode, slug, message}` returned by every Wiki.js mutation
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseResult {
    pub succeeded: bool,
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl ResponseResult {
    /// Turn `succeeded = false` into a rejection carrying slug and message verbatim
    pub fn ensure_succeeded(&self, operation: &str) -> Result<()> {
        if self.succeeded {
            return Ok(());
        }
        Err(WikiError::Rejected {
            operation: operation.to_string(),
            slug: self.slug.clone(),
            message: self.message.clone().unwrap_or_default(),
        })
    }
}

/// Mutation payload that carries nothing but the result envelope
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MutationStatus {
    pub response_result: ResponseResult,
}
