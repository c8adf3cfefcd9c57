//! `auth_strategies` - the ordered list of authentication strategy instances

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{forget_warning, Applied, DeleteOutcome, ReadOutcome, Resource};
use crate::codec::{
    decode_config_map, encode_config_map, ensure_unique_keys, rebuild_ordered, Positioned,
};
use crate::config::api::LOCAL_STRATEGY;
use crate::error::{Result, WikiError};
use crate::wiki::authentication::{ActiveStrategy, StrategyInput};
use crate::wiki::WikiClient;

fn default_true() -> bool {
    true
}

/// One strategy instance; its list index is its login order
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AuthStrategySpec {
    /// Instance key; generated on create when left out
    #[serde(default)]
    pub key: Option<String>,
    pub strategy_key: String,
    #[serde(default)]
    pub config: BTreeMap<String, String>,
    pub display_name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub self_registration: bool,
    #[serde(default)]
    pub domain_whitelist: Vec<String>,
    #[serde(default)]
    pub auto_enroll_groups: Vec<i64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AuthStrategiesSpec {
    pub strategies: Vec<AuthStrategySpec>,
}

impl TryFrom<&ActiveStrategy> for AuthStrategySpec {
    type Error = WikiError;

    fn try_from(strategy: &ActiveStrategy) -> Result<Self> {
        let (domain_whitelist, auto_enroll_groups) = if strategy.self_registration {
            (
                strategy.domain_whitelist.clone(),
                strategy.auto_enroll_groups.clone(),
            )
        } else {
            (Vec::new(), Vec::new())
        };

        Ok(Self {
            key: Some(strategy.key.clone()),
            strategy_key: strategy.strategy.key.clone(),
            config: decode_config_map(&strategy.config)?,
            display_name: strategy.display_name.clone(),
            enabled: strategy.is_enabled,
            self_registration: strategy.self_registration,
            domain_whitelist,
            auto_enroll_groups,
        })
    }
}

/// Give every keyless strategy a key: `local` for the local strategy, a UUID otherwise
fn resolve_keys(spec: &mut AuthStrategiesSpec) {
    for strategy in spec.strategies.iter_mut().filter(|s| s.key.is_none()) {
        let key = if strategy.strategy_key == LOCAL_STRATEGY {
            LOCAL_STRATEGY.to_string()
        } else {
            uuid::Uuid::new_v4().to_string()
        };
        debug!("Assigned key '{}' to {} strategy", key, strategy.strategy_key);
        strategy.key = Some(key);
    }
}

fn to_inputs(spec: &AuthStrategiesSpec) -> Result<Vec<StrategyInput>> {
    ensure_unique_keys(
        "strategies",
        spec.strategies.iter().filter_map(|s| s.key.as_deref()),
    )?;

    Ok(spec
        .strategies
        .iter()
        .enumerate()
        .map(|(order, s)| StrategyInput {
            key: s.key.clone().unwrap_or_default(),
            strategy_key: s.strategy_key.clone(),
            config: encode_config_map(&s.config),
            display_name: s.display_name.clone(),
            order: order as i64,
            is_enabled: s.enabled,
            self_registration: s.self_registration,
            domain_whitelist: s.domain_whitelist.clone(),
            auto_enroll_groups: s.auto_enroll_groups.clone(),
        })
        .collect())
}

async fn submit(client: &WikiClient, mut plan: AuthStrategiesSpec) -> Result<Applied<AuthStrategiesSpec>> {
    resolve_keys(&mut plan);
    let inputs = to_inputs(&plan)?;
    client.update_strategies(&inputs).await?;
    Ok(Applied::new(plan))
}

pub struct AuthStrategies;

impl Resource for AuthStrategies {
    const TYPE_NAME: &'static str = "auth_strategies";
    type Model = AuthStrategiesSpec;

    fn validate(model: &Self::Model) -> Result<()> {
        ensure_unique_keys(
            "strategies",
            model.strategies.iter().filter_map(|s| s.key.as_deref()),
        )?;

        for strategy in &model.strategies {
            if strategy.strategy_key.is_empty() {
                return Err(WikiError::Validation(format!(
                    "strategy '{}' needs a strategy_key",
                    strategy.display_name
                )));
            }
            let has_whitelist = !strategy.domain_whitelist.is_empty();
            let has_groups = !strategy.auto_enroll_groups.is_empty();
            if strategy.self_registration != has_whitelist || has_whitelist != has_groups {
                return Err(WikiError::Validation(format!(
                    "strategy '{}' must set self_registration, domain_whitelist and auto_enroll_groups together",
                    strategy.display_name
                )));
            }
        }
        Ok(())
    }

    async fn create(client: &WikiClient, plan: Self::Model) -> Result<Applied<Self::Model>> {
        submit(client, plan).await
    }

    async fn read(client: &WikiClient, _prior: &Self::Model) -> Result<ReadOutcome<Self::Model>> {
        let active = client.get_active_strategies().await?;

        let records = active
            .iter()
            .map(|s| Ok((s.position()?, AuthStrategySpec::try_from(s)?)))
            .collect::<Result<Vec<_>>>()?;

        let mut strategies = Vec::with_capacity(records.len());
        rebuild_ordered(&mut strategies, records)?;
        Ok(ReadOutcome::Present(AuthStrategiesSpec { strategies }))
    }

    async fn update(
        client: &WikiClient,
        _prior: &Self::Model,
        plan: Self::Model,
    ) -> Result<Applied<Self::Model>> {
        submit(client, plan).await
    }

    async fn delete(_client: &WikiClient, _state: &Self::Model) -> Result<DeleteOutcome> {
        Ok(forget_warning("Authentication strategies"))
    }
}
