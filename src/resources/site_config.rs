//! `site_config` - the site-wide settings object

use super::{forget_warning, Applied, DeleteOutcome, ReadOutcome, Resource};
use crate::error::Result;
use crate::wiki::site_config;
use crate::wiki::WikiClient;

pub struct SiteConfig;

impl Resource for SiteConfig {
    const TYPE_NAME: &'static str = "site_config";
    type Model = site_config::SiteConfig;

    /// Robots directives are a set
    fn normalize(model: &mut Self::Model) {
        model.robots.sort();
        model.robots.dedup();
    }

    async fn create(client: &WikiClient, plan: Self::Model) -> Result<Applied<Self::Model>> {
        client.update_site_config(&plan).await?;
        Ok(Applied::new(plan))
    }

    async fn read(client: &WikiClient, _prior: &Self::Model) -> Result<ReadOutcome<Self::Model>> {
        let mut config = client.get_site_config().await?;
        Self::normalize(&mut config);
        Ok(ReadOutcome::Present(config))
    }

    async fn update(
        client: &WikiClient,
        _prior: &Self::Model,
        plan: Self::Model,
    ) -> Result<Applied<Self::Model>> {
        Self::create(client, plan).await
    }

    async fn delete(_client: &WikiClient, _state: &Self::Model) -> Result<DeleteOutcome> {
        Ok(forget_warning("Site configuration"))
    }
}
