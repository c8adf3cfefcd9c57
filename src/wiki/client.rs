//! Wiki.js GraphQL client

use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::api;
use crate::error::{Result, WikiError};
use crate::wiki::credentials::Auth;
use crate::wiki::result::ResponseResult;

const LOGIN_MUTATION: &str = r#"
mutation Login($username: String!, $password: String!, $strategy: String!) {
  authentication {
    login(username: $username, password: $password, strategy: $strategy) {
      responseResult { succeeded errorCode slug message }
      jwt
      mustChangePwd
      mustProvideTFA
    }
  }
}"#;

/// Wiki.js API client
///
/// Immutable once built; every operation borrows it.
pub struct WikiClient {
    client: Client,
    site: String,
    token: String,
}

#[derive(Deserialize, Debug)]
struct GraphQlEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize, Debug)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize, Debug)]
struct LoginData {
    authentication: LoginAuthentication,
}

#[derive(Deserialize, Debug)]
struct LoginAuthentication {
    login: LoginResult,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct LoginResult {
    response_result: ResponseResult,
    jwt: Option<String>,
    #[serde(default)]
    must_change_pwd: Option<bool>,
    #[serde(default, rename = "mustProvideTFA")]
    must_provide_tfa: Option<bool>,
}

impl WikiClient {
    /// Create a client that authenticates with an existing token (API key or JWT)
    pub fn with_token(site: &str, token: String) -> Self {
        Self {
            client: Self::build_http_client(),
            site: normalize_site(site),
            token,
        }
    }

    /// Log in with email and password and return a client carrying the session JWT
    pub async fn login(site: &str, email: &str, password: &str, strategy: &str) -> Result<Self> {
        let anonymous = Self::with_token(site, String::new());
        debug!("Logging in to {} as {} ({})", anonymous.site, email, strategy);

        let data: LoginData = anonymous
            .graphql(
                "Login",
                LOGIN_MUTATION,
                json!({
                    "username": email,
                    "password": password,
                    "strategy": strategy,
                }),
            )
            .await?;

        let login = data.authentication.login;
        login.response_result.ensure_succeeded("Login")?;

        if login.must_change_pwd.unwrap_or(false) || login.must_provide_tfa.unwrap_or(false) {
            return Err(WikiError::Credentials(format!(
                "Login for '{}' needs an interactive step (password change or 2FA); use an API key instead",
                email
            )));
        }

        let jwt = login.jwt.filter(|t| !t.is_empty()).ok_or_else(|| {
            WikiError::Credentials(format!("Login for '{}' returned no session token", email))
        })?;

        Ok(Self {
            token: jwt,
            ..anonymous
        })
    }

    fn build_http_client() -> Client {
        Client::builder()
            .pool_max_idle_per_host(20)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| Client::new())
    }

    /// Site URL without trailing slash
    pub fn site(&self) -> &str {
        &self.site
    }

    /// GraphQL endpoint URL
    pub(crate) fn endpoint(&self) -> String {
        format!("{}{}", self.site, api::GRAPHQL_PATH)
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        let builder = self.client.post(url).header("Content-Type", "application/json");
        if self.token.is_empty() {
            builder
        } else {
            builder.header("Authorization", format!("Bearer {}", self.token))
        }
    }

    /// Run one GraphQL operation and decode its `data` member
    ///
    /// A non-empty `errors` array fails the call even when `data` is present.
    pub async fn graphql<T>(&self, operation: &str, query: &str, variables: Value) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint();
        debug!("GraphQL {} -> {}", operation, url);

        let body = json!({
            "operationName": operation,
            "query": query,
            "variables": variables,
        });

        let response = self.post(&url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(WikiError::Api {
                status: status.as_u16(),
                message: format!("{} failed: {}", operation, first_line(&text)),
            });
        }

        let envelope: GraphQlEnvelope = serde_json::from_str(&text).map_err(|e| {
            WikiError::Json(format!("Invalid GraphQL response for {}: {}", operation, e))
        })?;

        if !envelope.errors.is_empty() {
            let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
            debug!("{} returned errors: {:?}", operation, messages);
            return Err(WikiError::GraphQl {
                operation: operation.to_string(),
                messages,
            });
        }

        let data = envelope.data.filter(|d| !d.is_null()).ok_or_else(|| {
            WikiError::Json(format!("GraphQL response for {} has no data", operation))
        })?;

        serde_json::from_value(data).map_err(|e| {
            WikiError::Json(format!("Failed to parse {} response: {}", operation, e))
        })
    }
}

/// Resolved site and credentials, not yet used to contact Wiki.js
///
/// Commands check their local inputs first and only then call `connect`,
/// so invalid input never triggers a login request.
#[derive(Debug, Clone)]
pub struct Connection {
    site: String,
    auth: Auth,
}

impl Connection {
    pub fn new(site: &str, auth: Auth) -> Self {
        Self {
            site: normalize_site(site),
            auth,
        }
    }

    /// Site URL without trailing slash
    pub fn site(&self) -> &str {
        &self.site
    }

    /// Build a client, logging in first when authenticating with email and password
    pub async fn connect(&self) -> Result<WikiClient> {
        match &self.auth {
            Auth::Token(token) => Ok(WikiClient::with_token(&self.site, token.clone())),
            Auth::Login { email, password } => {
                WikiClient::login(&self.site, email, password, api::LOCAL_STRATEGY).await
            }
        }
    }
}

fn normalize_site(site: &str) -> String {
    site.trim().trim_end_matches('/').to_string()
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("").trim()
}

#[cfg(test)]
impl WikiClient {
    /// Create a test client pointed at a mock server
    pub fn test_client(base_url: &str) -> Self {
        Self::with_token(base_url, "test-token".to_string())
    }
}
