//! Authentication API operations

use log::debug;
use serde::Deserialize;
use serde_json::json;

use crate::error::Result;
use crate::wiki::{MutationStatus, ResponseResult, WikiClient};

use super::models::{ActiveStrategy, ApiKey, StrategyInput};

const GET_ACTIVE_STRATEGIES: &str = r#"
query GetActiveStrategies($enabledOnly: Boolean) {
  authentication {
    activeStrategies(enabledOnly: $enabledOnly) {
      key
      strategy { key title }
      displayName
      order
      isEnabled
      config { key value }
      selfRegistration
      domainWhitelist
      autoEnrollGroups
    }
  }
}"#;

const UPDATE_STRATEGIES: &str = r#"
mutation UpdateStrategies($strategies: [AuthenticationStrategyInput]!) {
  authentication {
    updateStrategies(strategies: $strategies) {
      responseResult { succeeded errorCode slug message }
    }
  }
}"#;

const GET_API_STATE: &str = r#"
query GetApiState {
  authentication { apiState }
}"#;

const SET_API_STATE: &str = r#"
mutation SetApiState($enabled: Boolean!) {
  authentication {
    setApiState(enabled: $enabled) {
      responseResult { succeeded errorCode slug message }
    }
  }
}"#;

const GET_API_KEYS: &str = r#"
query GetApiKeys {
  authentication {
    apiKeys { id name keyShort expiration createdAt updatedAt isRevoked }
  }
}"#;

const CREATE_API_KEY: &str = r#"
mutation CreateApiKey($name: String!, $expiration: String!, $fullAccess: Boolean!, $group: Int) {
  authentication {
    createApiKey(name: $name, expiration: $expiration, fullAccess: $fullAccess, group: $group) {
      responseResult { succeeded errorCode slug message }
      key
    }
  }
}"#;

const REVOKE_API_KEY: &str = r#"
mutation RevokeApiKey($id: Int!) {
  authentication {
    revokeApiKey(id: $id) {
      responseResult { succeeded errorCode slug message }
    }
  }
}"#;

#[derive(Deserialize)]
struct Data<T> {
    authentication: T,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActiveStrategies {
    #[serde(default, deserialize_with = "crate::wiki::null_as_default")]
    active_strategies: Vec<ActiveStrategy>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateStrategies {
    update_strategies: MutationStatus,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiState {
    api_state: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetApiState {
    set_api_state: MutationStatus,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiKeys {
    #[serde(default, deserialize_with = "crate::wiki::null_as_default")]
    api_keys: Vec<ApiKey>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateApiKey {
    create_api_key: CreatedApiKey,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedApiKey {
    response_result: ResponseResult,
    key: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RevokeApiKey {
    revoke_api_key: MutationStatus,
}

impl WikiClient {
    /// Get all configured strategy instances, enabled or not
    pub async fn get_active_strategies(&self) -> Result<Vec<ActiveStrategy>> {
        let data: Data<ActiveStrategies> = self
            .graphql(
                "GetActiveStrategies",
                GET_ACTIVE_STRATEGIES,
                json!({ "enabledOnly": false }),
            )
            .await?;
        debug!(
            "Fetched {} authentication strategies",
            data.authentication.active_strategies.len()
        );
        Ok(data.authentication.active_strategies)
    }

    /// Replace the full list of strategy instances
    pub async fn update_strategies(&self, strategies: &[StrategyInput]) -> Result<()> {
        let data: Data<UpdateStrategies> = self
            .graphql(
                "UpdateStrategies",
                UPDATE_STRATEGIES,
                json!({ "strategies": strategies }),
            )
            .await?;
        data.authentication
            .update_strategies
            .response_result
            .ensure_succeeded("Update authentication strategies")
    }

    /// Whether API access is enabled
    pub async fn get_api_state(&self) -> Result<bool> {
        let data: Data<ApiState> = self.graphql("GetApiState", GET_API_STATE, json!({})).await?;
        Ok(data.authentication.api_state)
    }

    /// Enable or disable API access
    pub async fn set_api_state(&self, enabled: bool) -> Result<()> {
        let data: Data<SetApiState> = self
            .graphql("SetApiState", SET_API_STATE, json!({ "enabled": enabled }))
            .await?;
        data.authentication
            .set_api_state
            .response_result
            .ensure_succeeded("Set API state")
    }

    /// List API keys, revoked ones included
    pub async fn get_api_keys(&self) -> Result<Vec<ApiKey>> {
        let data: Data<ApiKeys> = self.graphql("GetApiKeys", GET_API_KEYS, json!({})).await?;
        Ok(data.authentication.api_keys)
    }

    /// Create an API key and return its secret
    ///
    /// `expiration` uses the Wiki.js duration syntax (e.g. `1y`, `30d`).
    pub async fn create_api_key(
        &self,
        name: &str,
        expiration: &str,
        full_access: bool,
        group: Option<i64>,
    ) -> Result<String> {
        debug!("Creating API key '{}' (expires in {})", name, expiration);
        let data: Data<CreateApiKey> = self
            .graphql(
                "CreateApiKey",
                CREATE_API_KEY,
                json!({
                    "name": name,
                    "expiration": expiration,
                    "fullAccess": full_access,
                    "group": group,
                }),
            )
            .await?;

        let created = data.authentication.create_api_key;
        created.response_result.ensure_succeeded("Create API key")?;
        created.key.filter(|k| !k.is_empty()).ok_or_else(|| {
            crate::error::WikiError::Json(format!("Wiki.js returned no key for API key '{}'", name))
        })
    }

    /// Revoke an API key
    pub async fn revoke_api_key(&self, id: i64) -> Result<()> {
        let data: Data<RevokeApiKey> = self
            .graphql("RevokeApiKey", REVOKE_API_KEY, json!({ "id": id }))
            .await?;
        data.authentication
            .revoke_api_key
            .response_result
            .ensure_succeeded("Revoke API key")
    }
}
