//! `api` and `api_key` - GraphQL API access and its keys

use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{Applied, DeleteOutcome, ReadOutcome, Resource};
use crate::error::{Result, WikiError};
use crate::wiki::authentication;
use crate::wiki::WikiClient;

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ApiSpec {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

pub struct Api;

impl Resource for Api {
    const TYPE_NAME: &'static str = "api";
    type Model = ApiSpec;

    async fn create(client: &WikiClient, plan: Self::Model) -> Result<Applied<Self::Model>> {
        client.set_api_state(plan.enabled).await?;
        Ok(Applied::new(plan))
    }

    async fn read(client: &WikiClient, _prior: &Self::Model) -> Result<ReadOutcome<Self::Model>> {
        let enabled = client.get_api_state().await?;
        Ok(ReadOutcome::Present(ApiSpec { enabled }))
    }

    async fn update(
        client: &WikiClient,
        _prior: &Self::Model,
        plan: Self::Model,
    ) -> Result<Applied<Self::Model>> {
        Self::create(client, plan).await
    }

    async fn delete(client: &WikiClient, _state: &Self::Model) -> Result<DeleteOutcome> {
        client.set_api_state(false).await?;
        Ok(DeleteOutcome::Forgotten {
            warning: "API access was disabled and removed from the state".to_string(),
        })
    }
}

/// Parse a `<n><s|m|h|d>` duration
pub(crate) fn parse_duration(text: &str) -> Result<Duration> {
    let invalid = || {
        WikiError::Validation(format!(
            "duration '{}' must be a number followed by s, m, h or d",
            text
        ))
    };

    let unit = text.chars().last().ok_or_else(invalid)?;
    let amount: i64 = text[..text.len() - unit.len_utf8()]
        .parse()
        .map_err(|_| invalid())?;
    if amount < 0 {
        return Err(invalid());
    }

    match unit {
        's' => Duration::try_seconds(amount),
        'm' => Duration::try_minutes(amount),
        'h' => Duration::try_hours(amount),
        'd' => Duration::try_days(amount),
        _ => None,
    }
    .ok_or_else(invalid)
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ApiKeySpec {
    pub name: String,
    /// Wiki.js duration syntax, e.g. `1y` or `30d`
    pub expires_in: String,
    #[serde(default)]
    pub full_access: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    /// Replace the key once less than this much lifetime is left
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_remaining_duration: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub key_short: Option<String>,
    #[serde(default)]
    pub expiration: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Secret; only known right after creation
    #[serde(default)]
    pub key: Option<String>,
}

impl ApiKeySpec {
    fn fill_computed(&mut self, key: &authentication::ApiKey) {
        self.id = Some(key.id);
        self.key_short = Some(key.key_short.clone());
        self.expiration = Some(key.expiration.clone());
        self.created_at = Some(key.created_at.clone());
    }
}

/// Time left before `expiration`; `None` when the server value is unparseable
fn remaining(expiration: &str, now: DateTime<Utc>) -> Option<Duration> {
    DateTime::parse_from_rfc3339(expiration)
        .ok()
        .map(|at| at.with_timezone(&Utc) - now)
}

pub struct ApiKey;

impl Resource for ApiKey {
    const TYPE_NAME: &'static str = "api_key";
    type Model = ApiKeySpec;

    fn validate(model: &Self::Model) -> Result<()> {
        if model.name.is_empty() {
            return Err(WikiError::Validation("API key needs a name".to_string()));
        }
        if model.expires_in.is_empty() {
            return Err(WikiError::Validation(format!(
                "API key '{}' needs expires_in",
                model.name
            )));
        }
        if model.full_access == model.group_id.is_some() {
            return Err(WikiError::Validation(format!(
                "API key '{}' needs exactly one of full_access or group_id",
                model.name
            )));
        }
        if let Some(min) = &model.min_remaining_duration {
            parse_duration(min)?;
        }
        Ok(())
    }

    fn requires_replace(prior: &Self::Model, plan: &Self::Model) -> bool {
        prior.name != plan.name
            || prior.full_access != plan.full_access
            || prior.group_id != plan.group_id
            || prior.expires_in != plan.expires_in
            || prior.min_remaining_duration != plan.min_remaining_duration
    }

    async fn create(client: &WikiClient, mut plan: Self::Model) -> Result<Applied<Self::Model>> {
        let secret = client
            .create_api_key(&plan.name, &plan.expires_in, plan.full_access, plan.group_id)
            .await?;

        // The mutation only returns the secret; the id comes from the key list
        let created = client
            .get_api_keys()
            .await?
            .into_iter()
            .filter(|k| k.name == plan.name && !k.is_revoked && secret.ends_with(k.key_suffix()))
            .max_by_key(|k| k.id)
            .ok_or_else(|| WikiError::Consistency {
                kind: "API key".to_string(),
                expected: format!("'{}'", plan.name),
                actual: "no matching key in the key list".to_string(),
            })?;

        debug!("Created API key '{}' with id {}", plan.name, created.id);
        plan.fill_computed(&created);
        plan.key = Some(secret);
        Ok(Applied::new(plan))
    }

    async fn read(client: &WikiClient, prior: &Self::Model) -> Result<ReadOutcome<Self::Model>> {
        let Some(id) = prior.id else {
            return Ok(ReadOutcome::Gone);
        };
        let Some(key) = client
            .get_api_keys()
            .await?
            .into_iter()
            .find(|k| k.id == id && !k.is_revoked)
        else {
            return Ok(ReadOutcome::Gone);
        };

        let mut model = prior.clone();
        model.name = key.name.clone();
        model.fill_computed(&key);

        // A key too close to expiry reports its actual remaining time so the plan replaces it
        if let Some(min) = &prior.min_remaining_duration {
            let min = parse_duration(min)?;
            if let Some(left) = remaining(&key.expiration, Utc::now()) {
                if left < min {
                    warn!(
                        "API key '{}' expires in less than the required remaining duration",
                        key.name
                    );
                    model.min_remaining_duration = Some(format!("{}s", left.num_seconds().max(0)));
                }
            }
        }
        Ok(ReadOutcome::Present(model))
    }

    /// Every input change is a replacement, so this only adopts the plan
    async fn update(
        _client: &WikiClient,
        _prior: &Self::Model,
        plan: Self::Model,
    ) -> Result<Applied<Self::Model>> {
        Ok(Applied::new(plan))
    }

    async fn delete(client: &WikiClient, state: &Self::Model) -> Result<DeleteOutcome> {
        let id = state
            .id
            .ok_or_else(|| WikiError::State(format!("API key '{}' in state has no id", state.name)))?;
        client.revoke_api_key(id).await?;
        Ok(DeleteOutcome::Deleted)
    }
}
