//! Localization API operations

use log::{debug, info};
use serde::Deserialize;
use serde_json::json;

use crate::error::Result;
use crate::wiki::{MutationStatus, WikiClient};

use super::models::{Locale, LocaleConfig, Localization};

const GET_LOCALIZATION: &str = r#"
query GetLocalization {
  localization {
    config {
      locale
      auto_update: autoUpdate
      namespacing
      namespaces
    }
    locales {
      code name nativeName availability isInstalled isRTL installDate createdAt updatedAt
    }
  }
}"#;

const DOWNLOAD_LOCALE: &str = r#"
mutation DownloadLocale($locale: String!) {
  localization {
    downloadLocale(locale: $locale) {
      responseResult { succeeded errorCode slug message }
    }
  }
}"#;

const UPDATE_LOCALE: &str = r#"
mutation UpdateLocale($locale: String!, $auto_update: Boolean!, $namespacing: Boolean!, $namespaces: [String]!) {
  localization {
    updateLocale(locale: $locale, autoUpdate: $auto_update, namespacing: $namespacing, namespaces: $namespaces) {
      responseResult { succeeded errorCode slug message }
    }
  }
}"#;

#[derive(Deserialize)]
struct Data<T> {
    localization: T,
}

#[derive(Deserialize)]
struct GetLocalization {
    config: LocaleConfig,
    #[serde(default, deserialize_with = "crate::wiki::null_as_default")]
    locales: Vec<Locale>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DownloadLocale {
    download_locale: MutationStatus,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateLocale {
    update_locale: MutationStatus,
}

impl WikiClient {
    /// Get the locale settings and the locale catalog
    pub async fn get_localization(&self) -> Result<Localization> {
        let data: Data<GetLocalization> = self
            .graphql("GetLocalization", GET_LOCALIZATION, json!({}))
            .await?;
        debug!("Fetched {} locales", data.localization.locales.len());
        Ok(Localization {
            config: data.localization.config,
            locales: data.localization.locales,
        })
    }

    /// Download (install) a locale
    pub async fn download_locale(&self, locale: &str) -> Result<()> {
        info!("Downloading locale '{}'", locale);
        let data: Data<DownloadLocale> = self
            .graphql("DownloadLocale", DOWNLOAD_LOCALE, json!({ "locale": locale }))
            .await?;
        data.localization
            .download_locale
            .response_result
            .ensure_succeeded(&format!("Install locale '{}'", locale))
    }

    /// Replace the locale settings
    pub async fn update_locale(&self, config: &LocaleConfig) -> Result<()> {
        debug!("Updating localization to '{}'", config.locale);
        let data: Data<UpdateLocale> = self
            .graphql("UpdateLocale", UPDATE_LOCALE, serde_json::to_value(config)?)
            .await?;
        data.localization
            .update_locale
            .response_result
            .ensure_succeeded("Update localization")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WikiError;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_localization() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({ "operationName": "GetLocalization" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "localization": {
                    "config": { "locale": "en", "auto_update": true, "namespacing": false, "namespaces": [] },
                    "locales": [
                        { "code": "en", "name": "English", "nativeName": "English", "availability": 100, "isInstalled": true, "isRTL": false },
                        { "code": "de", "name": "German", "nativeName": "Deutsch", "availability": 98, "isInstalled": false, "isRTL": false }
                    ]
                }}
            })))
            .mount(&mock_server)
            .await;

        let localization = client.get_localization().await.unwrap();
        assert_eq!(localization.config.locale, "en");
        assert_eq!(localization.locales.len(), 2);
        assert!(localization.locales[0].is_installed);
    }

    #[tokio::test]
    async fn test_download_locale_rejected_names_locale() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({
                "operationName": "DownloadLocale",
                "variables": { "locale": "xx" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "localization": { "downloadLocale": {
                    "responseResult": { "succeeded": false, "errorCode": 5001, "slug": "LocaleUnknown", "message": "Unknown locale" }
                }}}
            })))
            .mount(&mock_server)
            .await;

        match client.download_locale("xx").await.unwrap_err() {
            WikiError::Rejected { operation, slug, .. } => {
                assert!(operation.contains("'xx'"));
                assert_eq!(slug, "LocaleUnknown");
            }
            other => panic!("Expected WikiError::Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_locale() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({
                "operationName": "UpdateLocale",
                "variables": { "locale": "de", "auto_update": false, "namespaces": ["de", "en"] }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "localization": { "updateLocale": {
                    "responseResult": { "succeeded": true, "errorCode": 0, "slug": "ok", "message": "" }
                }}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = LocaleConfig {
            locale: "de".to_string(),
            auto_update: false,
            namespacing: true,
            namespaces: vec!["de".to_string(), "en".to_string()],
        };
        client.update_locale(&config).await.unwrap();
    }
}
