//! Authentication resolution from multiple sources

use log::debug;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::credentials;
use crate::error::{Result, WikiError};

/// Credentials file structure (shared with SiteResolver)
#[derive(Deserialize, Debug, Default)]
pub(crate) struct CredentialsFile {
    #[serde(default)]
    pub(crate) sites: BTreeMap<String, SiteCredential>,
}

/// One site entry: an API key, or an email/password pair
#[derive(Deserialize, Debug, Default, Clone)]
pub(crate) struct SiteCredential {
    pub(crate) token: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) password: Option<String>,
}

impl CredentialsFile {
    /// Path to `~/.wikictl/credentials.json`
    pub(crate) fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(credentials::FILE_PATH))
    }

    /// Load the file; `Ok(None)` when it does not exist
    pub(crate) fn load(path: &Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map(Some).map_err(|e| {
            WikiError::Credentials(format!(
                "Could not parse credentials file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Find the entry for a site, ignoring a trailing slash
    pub(crate) fn find(&self, site: &str) -> Option<&SiteCredential> {
        let wanted = site.trim_end_matches('/');
        self.sites
            .iter()
            .find(|(key, _)| key.trim_end_matches('/') == wanted)
            .map(|(_, cred)| cred)
    }
}

/// How the client authenticates
#[derive(Debug, Clone, PartialEq)]
pub enum Auth {
    /// API key (or an already issued JWT)
    Token(String),
    /// Local strategy login
    Login { email: String, password: String },
}

/// Authentication resolution with fallback logic
pub struct AuthResolver {
    site: String,
}

impl AuthResolver {
    /// Create a new resolver for the given site
    pub fn new(site: &str) -> Self {
        Self {
            site: site.to_string(),
        }
    }

    /// Resolve authentication from multiple sources with fallback:
    /// 1. Token from CLI or WIKIJS_TOKEN
    /// 2. Email/password from CLI
    /// 3. Email/password environment variables
    /// 4. Credentials file entry for the site
    pub fn resolve(
        &self,
        cli_token: Option<&str>,
        cli_email: Option<&str>,
        cli_password: Option<&str>,
    ) -> Result<Auth> {
        if let Some(token) = cli_token.filter(|t| !t.is_empty()) {
            debug!("Using API token from CLI argument");
            return Ok(Auth::Token(token.to_string()));
        }

        if let Ok(token) = std::env::var(credentials::TOKEN_ENV_VAR) {
            if !token.is_empty() {
                debug!(
                    "Using API token from {} environment variable",
                    credentials::TOKEN_ENV_VAR
                );
                return Ok(Auth::Token(token));
            }
        }

        let email = cli_email
            .map(str::to_string)
            .or_else(|| first_env(credentials::EMAIL_ENV_VARS));
        let password = cli_password
            .map(str::to_string)
            .or_else(|| first_env(credentials::PASSWORD_ENV_VARS));

        if let (Some(email), Some(password)) = (email.clone(), password.clone()) {
            debug!("Using email/password login for {}", email);
            return Ok(Auth::Login { email, password });
        }

        debug!("No credentials in CLI or environment, trying credentials file");
        self.read_from_credentials_file(email, password)
    }

    fn read_from_credentials_file(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<Auth> {
        let path = CredentialsFile::path()
            .ok_or_else(|| WikiError::CredentialsNotFound(self.not_found_message(None)))?;

        debug!("Looking for credentials file at: {}", path.display());

        let file = CredentialsFile::load(&path)?
            .ok_or_else(|| WikiError::CredentialsNotFound(self.not_found_message(Some(&path))))?;

        let entry = file
            .find(&self.site)
            .ok_or_else(|| WikiError::CredentialsNotFound(self.not_found_message(Some(&path))))?;

        Self::auth_from_entry(entry, email, password)
            .ok_or_else(|| WikiError::CredentialsNotFound(self.not_found_message(Some(&path))))
    }

    /// Combine a file entry with partial email/password values from CLI or env
    fn auth_from_entry(
        entry: &SiteCredential,
        email: Option<String>,
        password: Option<String>,
    ) -> Option<Auth> {
        if let Some(token) = entry.token.as_ref().filter(|t| !t.is_empty()) {
            return Some(Auth::Token(token.clone()));
        }
        let email = email.or_else(|| entry.email.clone())?;
        let password = password.or_else(|| entry.password.clone())?;
        Some(Auth::Login { email, password })
    }

    fn not_found_message(&self, credentials_path: Option<&Path>) -> String {
        let creds_info = credentials_path
            .map(|p| format!(" or in credentials file {}", p.display()))
            .unwrap_or_default();

        format!(
            "No credentials found for site '{}'. Please provide them using one of:\n\
             \n\
             1. API key:           wikictl --token <KEY>   (or export {}=<KEY>)\n\
             2. Login:             wikictl --email <EMAIL> --password <PASSWORD>\n\
             3. Environment vars:  export {}=<EMAIL> {}=<PASSWORD>\n\
             \n\
             Checked: CLI, environment{}",
            self.site,
            credentials::TOKEN_ENV_VAR,
            credentials::EMAIL_ENV_VARS[0],
            credentials::PASSWORD_ENV_VARS[0],
            creds_info
        )
    }
}

fn first_env(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        std::env::var(name).ok().filter(|v| !v.is_empty()).map(|v| {
            debug!("Using value from {} environment variable", name);
            v
        })
    })
}
