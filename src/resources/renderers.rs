//! `renderers` - enabled state and settings of the rendering pipeline

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{forget_warning, Applied, DeleteOutcome, ReadOutcome, Resource};
use crate::codec::{decode_config_map, encode_config_map, ensure_unique_keys, rebuild_by_index};
use crate::error::Result;
use crate::wiki::rendering::RendererInput;
use crate::wiki::WikiClient;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RendererSpec {
    pub key: String,
    pub is_enabled: bool,
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RenderersSpec {
    pub renderers: Vec<RendererSpec>,
}

fn keys(spec: &RenderersSpec) -> impl Iterator<Item = &str> {
    spec.renderers.iter().map(|r| r.key.as_str())
}

async fn submit(client: &WikiClient, plan: RenderersSpec) -> Result<Applied<RenderersSpec>> {
    ensure_unique_keys("renderers", keys(&plan))?;
    let inputs: Vec<RendererInput> = plan
        .renderers
        .iter()
        .map(|r| RendererInput {
            key: r.key.clone(),
            is_enabled: r.is_enabled,
            config: encode_config_map(&r.config),
        })
        .collect();
    client.update_renderers(&inputs).await?;
    Ok(Applied::new(plan))
}

pub struct Renderers;

impl Resource for Renderers {
    const TYPE_NAME: &'static str = "renderers";
    type Model = RenderersSpec;

    fn validate(model: &Self::Model) -> Result<()> {
        ensure_unique_keys("renderers", keys(model))
    }

    async fn create(client: &WikiClient, plan: Self::Model) -> Result<Applied<Self::Model>> {
        submit(client, plan).await
    }

    async fn read(client: &WikiClient, _prior: &Self::Model) -> Result<ReadOutcome<Self::Model>> {
        let records = client
            .get_renderers(None, None)
            .await?
            .iter()
            .map(|r| {
                Ok(RendererSpec {
                    key: r.key.clone(),
                    is_enabled: r.is_enabled,
                    config: decode_config_map(&r.config)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut renderers = Vec::with_capacity(records.len());
        rebuild_by_index(&mut renderers, records);
        Ok(ReadOutcome::Present(RenderersSpec { renderers }))
    }

    async fn update(
        client: &WikiClient,
        _prior: &Self::Model,
        plan: Self::Model,
    ) -> Result<Applied<Self::Model>> {
        submit(client, plan).await
    }

    async fn delete(_client: &WikiClient, _state: &Self::Model) -> Result<DeleteOutcome> {
        Ok(forget_warning("Renderer configuration"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WikiError;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn renderer(key: &str, enabled: bool) -> RendererSpec {
        RendererSpec {
            key: key.to_string(),
            is_enabled: enabled,
            config: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_keys_make_no_network_call() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let spec = RenderersSpec {
            renderers: vec![renderer("markdownCore", true), renderer("markdownCore", false)],
        };
        let err = Renderers::create(&client, spec).await.unwrap_err();
        assert!(matches!(err, WikiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_submits_input_envelopes() {
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
                    "responseResult": { "succeeded": true, "errorCode": 0, "slug": "ok", "message": "" }
                }}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut core = renderer("markdownCore", true);
        core.config.insert("linkify".to_string(), "true".to_string());
        let applied = Renderers::create(&client, RenderersSpec { renderers: vec![core] })
            .await
            .unwrap();
        assert!(applied.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_read_keeps_server_order() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({ "operationName": "GetRenderers" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "rendering": { "renderers": [
                    { "key": "htmlCore", "isEnabled": true, "title": "Core", "config": [] },
                    { "key": "markdownCore", "isEnabled": false, "title": "Core",
                      "config": [{ "key": "breaks", "value": "{\"value\":false}" }] }
                ]}}
            })))
            .mount(&mock_server)
            .await;

        let ReadOutcome::Present(spec) = Renderers::read(&client, &RenderersSpec::default())
            .await
            .unwrap()
        else {
            panic!("Expected ReadOutcome::Present");
        };
        assert_eq!(spec.renderers[0].key, "htmlCore");
        assert_eq!(spec.renderers[1].config["breaks"], "false");
    }
}
