//! `theme_config` - the active theme and its injections

use super::{forget_warning, Applied, DeleteOutcome, ReadOutcome, Resource};
use crate::error::Result;
use crate::wiki::theming;
use crate::wiki::WikiClient;

pub struct ThemeConfig;

impl Resource for ThemeConfig {
    const TYPE_NAME: &'static str = "theme_config";
    type Model = theming::ThemeConfig;

    fn validate(model: &Self::Model) -> Result<()> {
        model.validate()
    }

    async fn create(client: &WikiClient, plan: Self::Model) -> Result<Applied<Self::Model>> {
        client.set_theme_config(&plan).await?;
        Ok(Applied::new(plan))
    }

    async fn read(client: &WikiClient, _prior: &Self::Model) -> Result<ReadOutcome<Self::Model>> {
        Ok(ReadOutcome::Present(client.get_theme_config().await?))
    }

    async fn update(
        client: &WikiClient,
        _prior: &Self::Model,
        plan: Self::Model,
    ) -> Result<Applied<Self::Model>> {
        Self::create(client, plan).await
    }

    async fn delete(_client: &WikiClient, _state: &Self::Model) -> Result<DeleteOutcome> {
        Ok(forget_warning("Theme configuration"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WikiError;
    use crate::resources::ResourceType;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_normalize_rejects_unknown_toc_position() {
        let err = ResourceType::ThemeConfig
            .normalize(&json!({ "toc_position": "top" }))
            .unwrap_err();
        match err {
            WikiError::Validation(msg) => assert!(msg.contains("top")),
            other => panic!("Expected WikiError::Validation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_iconset_makes_no_network_call() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let err = ResourceType::ThemeConfig
            .create(&client, &json!({ "iconset": "octicons" }))
            .await
            .unwrap_err();
        assert!(matches!(err, WikiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_read_is_always_present() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "theming": { "config": {
                    "theme": "default", "iconset": "fa", "dark_mode": true, "toc_position": "right",
                    "inject_css": null, "inject_head": "", "inject_body": ""
                }}}
            })))
            .mount(&mock_server)
            .await;

        let outcome = ThemeConfig::read(&client, &Default::default()).await.unwrap();
        let ReadOutcome::Present(config) = outcome else {
            panic!("Expected ReadOutcome::Present");
        };
        assert!(config.dark_mode);
        assert_eq!(config.iconset, "fa");
        assert_eq!(config.inject_css, "");
    }
}
