//! Renderer API operations

use log::debug;
use serde::Deserialize;
use serde_json::json;

use crate::error::Result;
use crate::wiki::{MutationStatus, WikiClient};

use super::models::{Renderer, RendererInput};

const GET_RENDERERS: &str = r#"
query GetRenderers($filter: String, $orderBy: String) {
  rendering {
    renderers(filter: $filter, orderBy: $orderBy) {
      key
      isEnabled
      title
      description
      dependsOn
      input
      output
      config { key value }
    }
  }
}"#;

const UPDATE_RENDERERS: &str = r#"
mutation UpdateRenderers($renderers: [RendererInput]) {
  rendering {
    updateRenderers(renderers: $renderers) {
      responseResult { succeeded errorCode slug message }
    }
  }
}"#;

#[derive(Deserialize)]
struct Data<T> {
    rendering: T,
}

#[derive(Deserialize)]
struct Renderers {
    #[serde(default, deserialize_with = "crate::wiki::null_as_default")]
    renderers: Vec<Renderer>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRenderers {
    update_renderers: MutationStatus,
}

impl WikiClient {
    /// Get renderers in the order Wiki.js returns them
    pub async fn get_renderers(
        &self,
        filter: Option<&str>,
        order_by: Option<&str>,
    ) -> Result<Vec<Renderer>> {
        let data: Data<Renderers> = self
            .graphql(
                "GetRenderers",
                GET_RENDERERS,
                json!({ "filter": filter, "orderBy": order_by }),
            )
            .await?;
        debug!("Fetched {} renderers", data.rendering.renderers.len());
        Ok(data.rendering.renderers)
    }

    /// Update enabled state and config of the given renderers
    pub async fn update_renderers(&self, renderers: &[RendererInput]) -> Result<()> {
        let data: Data<UpdateRenderers> = self
            .graphql(
                "UpdateRenderers",
                UPDATE_RENDERERS,
                json!({ "renderers": renderers }),
            )
            .await?;
        data.rendering
            .update_renderers
            .response_result
            .ensure_succeeded("Update renderers")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_config_map;
    use std::collections::BTreeMap;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_renderers_passes_filter() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({
                "operationName": "GetRenderers",
                "variables": { "filter": "markdown", "orderBy": null }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "rendering": { "renderers": [
                    {
                        "key": "markdownCore",
                        "isEnabled": true,
                        "title": "Core",
                        "description": null,
                        "dependsOn": null,
                        "input": "markdown",
                        "output": "html",
                        "config": [{ "key": "linkify", "value": "{\"value\":true}" }]
                    }
                ]}}
            })))
            .mount(&mock_server)
            .await;

        let renderers = client.get_renderers(Some("markdown"), None).await.unwrap();
        assert_eq!(renderers.len(), 1);
        assert_eq!(renderers[0].key, "markdownCore");
        assert_eq!(renderers[0].config[0].key, "linkify");
    }

    #[tokio::test]
    async fn test_update_renderers_sends_v_envelopes() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({
                "operationName": "UpdateRenderers",
                "variables": { "renderers": [{
                    "key": "markdownCore",
                    "isEnabled": true,
                    "config": [{ "key": "linkify", "value": "{\"v\":\"true\"}" }]
                }]}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "rendering": { "updateRenderers": {
                    "responseResult": { "succeeded": true, "errorCode": 0, "slug": "ok", "message": null }
                }}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut config = BTreeMap::new();
        config.insert("linkify".to_string(), "true".to_string());
        let input = RendererInput {
            key: "markdownCore".to_string(),
            is_enabled: true,
            config: encode_config_map(&config),
        };
        client.update_renderers(&[input]).await.unwrap();
    }
}
