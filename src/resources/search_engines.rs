//! `search_engines` - the active search engine and its settings

use std::collections::BTreeMap;

use log::info;
use serde::{Deserialize, Serialize};

use super::{forget_warning, Applied, DeleteOutcome, ReadOutcome, Resource};
use crate::codec::{decode_config_map, encode_config_map, ensure_unique_keys, rebuild_by_index};
use crate::error::{Result, WikiError};
use crate::wiki::search::SearchEngineInput;
use crate::wiki::WikiClient;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SearchEngineSpec {
    pub key: String,
    pub is_enabled: bool,
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SearchEnginesSpec {
    pub search_engines: Vec<SearchEngineSpec>,
}

fn enabled_engine(spec: &SearchEnginesSpec) -> Result<&SearchEngineSpec> {
    let enabled: Vec<&SearchEngineSpec> =
        spec.search_engines.iter().filter(|e| e.is_enabled).collect();
    match enabled.as_slice() {
        [engine] => Ok(*engine),
        [] => Err(WikiError::Validation(
            "exactly one search engine must be enabled, none is".to_string(),
        )),
        many => Err(WikiError::Validation(format!(
            "exactly one search engine must be enabled, got {}",
            many.iter().map(|e| e.key.as_str()).collect::<Vec<_>>().join(", ")
        ))),
    }
}

async fn submit(client: &WikiClient, plan: SearchEnginesSpec) -> Result<Applied<SearchEnginesSpec>> {
    ensure_unique_keys(
        "search_engines",
        plan.search_engines.iter().map(|e| e.key.as_str()),
    )?;
    let enabled = enabled_engine(&plan)?;

    let engines = client.get_search_engines().await?;
    match engines.iter().find(|e| e.key == enabled.key) {
        None => {
            return Err(WikiError::Validation(format!(
                "search engine '{}' does not exist",
                enabled.key
            )))
        }
        Some(engine) if !engine.available() => {
            return Err(WikiError::Validation(format!(
                "search engine '{}' is not available on this Wiki.js instance",
                enabled.key
            )))
        }
        Some(_) => {}
    }

    let inputs: Vec<SearchEngineInput> = plan
        .search_engines
        .iter()
        .map(|e| SearchEngineInput {
            key: e.key.clone(),
            is_enabled: e.is_enabled,
            config: encode_config_map(&e.config),
        })
        .collect();
    client.update_search_engines(&inputs).await?;
    info!("Search engine '{}' enabled, rebuilding index", enabled.key);
    client.rebuild_search_index().await?;
    Ok(Applied::new(plan))
}

pub struct SearchEngines;

impl Resource for SearchEngines {
    const TYPE_NAME: &'static str = "search_engines";
    type Model = SearchEnginesSpec;

    fn validate(model: &Self::Model) -> Result<()> {
        ensure_unique_keys(
            "search_engines",
            model.search_engines.iter().map(|e| e.key.as_str()),
        )?;
        enabled_engine(model).map(|_| ())
    }

    async fn create(client: &WikiClient, plan: Self::Model) -> Result<Applied<Self::Model>> {
        submit(client, plan).await
    }

    async fn read(client: &WikiClient, _prior: &Self::Model) -> Result<ReadOutcome<Self::Model>> {
        let records = client
            .get_search_engines()
            .await?
            .iter()
            .map(|e| {
                Ok(SearchEngineSpec {
                    key: e.key.clone(),
                    is_enabled: e.is_enabled,
                    config: decode_config_map(&e.config)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut search_engines = Vec::with_capacity(records.len());
        rebuild_by_index(&mut search_engines, records);
        Ok(ReadOutcome::Present(SearchEnginesSpec { search_engines }))
    }

    async fn update(
        client: &WikiClient,
        _prior: &Self::Model,
        plan: Self::Model,
    ) -> Result<Applied<Self::Model>> {
        submit(client, plan).await
    }

    async fn delete(_client: &WikiClient, _state: &Self::Model) -> Result<DeleteOutcome> {
        Ok(forget_warning("Search engine configuration"))
    }
}
