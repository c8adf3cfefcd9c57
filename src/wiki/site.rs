//! Site URL resolution from multiple sources

use dialoguer::{theme::ColorfulTheme, Select};
use log::debug;
use std::path::Path;

use crate::config::site as site_config;
use crate::error::{Result, WikiError};
use crate::wiki::credentials::CredentialsFile;

/// Site resolution with fallback logic
pub struct SiteResolver;

impl SiteResolver {
    /// Resolve the site URL from multiple sources with fallback:
    /// 1. CLI argument (if provided)
    /// 2. Environment variable (WIKIJS_SITE_URL)
    /// 3. Credentials file:
    ///    - If 1 site: use it
    ///    - If multiple sites: interactive selection (or error in batch mode)
    ///    - If no sites: error
    pub fn resolve(cli_site: Option<&str>, batch_mode: bool) -> Result<String> {
        if let Some(site) = cli_site {
            debug!("Using site from CLI argument: {}", site);
            return Self::validate(site);
        }

        if let Ok(site) = std::env::var(site_config::ENV_VAR) {
            debug!(
                "Using site from {} environment variable: {}",
                site_config::ENV_VAR,
                site
            );
            return Self::validate(&site);
        }

        debug!(
            "No site in CLI or {}, trying credentials file",
            site_config::ENV_VAR
        );
        Self::resolve_from_credentials_file(batch_mode)
    }

    /// Sites must be absolute http(s) URLs
    fn validate(site: &str) -> Result<String> {
        let trimmed = site.trim().trim_end_matches('/');
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Ok(trimmed.to_string())
        } else {
            Err(WikiError::Config(format!(
                "Site URL '{}' must start with http:// or https://",
                site
            )))
        }
    }

    fn resolve_from_credentials_file(batch_mode: bool) -> Result<String> {
        let path = CredentialsFile::path()
            .ok_or_else(|| WikiError::SiteNotFound(Self::site_not_found_message(None, None)))?;

        let file = CredentialsFile::load(&path)?.ok_or_else(|| {
            WikiError::SiteNotFound(Self::site_not_found_message(Some(&path), None))
        })?;

        let sites: Vec<String> = file.sites.keys().cloned().collect();

        match sites.as_slice() {
            [] => Err(WikiError::SiteNotFound(Self::site_not_found_message(
                Some(&path),
                None,
            ))),
            [only] => {
                debug!(
                    "Using single site from credentials file {}: {}",
                    path.display(),
                    only
                );
                Self::validate(only)
            }
            _ if batch_mode => Err(WikiError::SiteNotFound(Self::site_not_found_message(
                Some(&path),
                Some(&sites),
            ))),
            _ => Self::interactive_site_selection(&sites, &path),
        }
    }

    fn interactive_site_selection(sites: &[String], path: &Path) -> Result<String> {
        eprintln!("\nMultiple sites found in {}:", path.display());

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select a site")
            .items(sites)
            .default(0)
            .interact()
            .map_err(|e| WikiError::SiteNotFound(format!("Failed to select site: {}", e)))?;

        debug!("User selected site: {}", sites[selection]);
        Self::validate(&sites[selection])
    }

    fn site_not_found_message(path: Option<&Path>, available: Option<&[String]>) -> String {
        let creds_info = match (path, available) {
            (Some(p), Some(sites)) => format!(
                "\n   Credentials file: {} ({} sites found)\n   Available sites: {}",
                p.display(),
                sites.len(),
                sites.join(", ")
            ),
            (Some(p), None) => format!("\n   Credentials file: {} (no sites found)", p.display()),
            (None, _) => "\n   Credentials file: not found".to_string(),
        };

        format!(
            "No Wiki.js site specified. Please provide one using one of:\n\
             \n\
             1. CLI argument:      wikictl --site <URL>\n\
             2. Environment var:   export {}=<URL>\n\
             \n\
             Checked:{}\n",
            site_config::ENV_VAR,
            creds_info
        )
    }
}
