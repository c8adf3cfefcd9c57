//! `localization` - the site locale, installing every locale it needs

use log::debug;

use super::{forget_warning, Applied, DeleteOutcome, ReadOutcome, Resource};
use crate::error::{Result, WikiError};
use crate::wiki::localization::LocaleConfig;
use crate::wiki::WikiClient;

async fn install_and_set(client: &WikiClient, plan: LocaleConfig) -> Result<Applied<LocaleConfig>> {
    let install = plan.locales_to_install();
    debug!("Installing {} locale(s) before switching to '{}'", install.len(), plan.locale);
    for locale in install {
        client.download_locale(locale).await?;
    }
    client.update_locale(&plan).await?;
    Ok(Applied::new(plan))
}

pub struct Localization;

impl Resource for Localization {
    const TYPE_NAME: &'static str = "localization";
    type Model = LocaleConfig;

    fn validate(model: &Self::Model) -> Result<()> {
        if model.locale.is_empty() {
            return Err(WikiError::Validation(
                "localization needs a locale".to_string(),
            ));
        }
        if !model.namespacing && !model.namespaces.is_empty() {
            return Err(WikiError::Validation(
                "localization sets namespaces without namespacing".to_string(),
            ));
        }
        Ok(())
    }

    /// Namespaces are a set
    fn normalize(model: &mut Self::Model) {
        model.namespaces.sort();
        model.namespaces.dedup();
    }

    async fn create(client: &WikiClient, plan: Self::Model) -> Result<Applied<Self::Model>> {
        install_and_set(client, plan).await
    }

    async fn read(client: &WikiClient, _prior: &Self::Model) -> Result<ReadOutcome<Self::Model>> {
        let mut config = client.get_localization().await?.config;
        Self::normalize(&mut config);
        Ok(ReadOutcome::Present(config))
    }

    async fn update(
        client: &WikiClient,
        _prior: &Self::Model,
        plan: Self::Model,
    ) -> Result<Applied<Self::Model>> {
        install_and_set(client, plan).await
    }

    async fn delete(_client: &WikiClient, _state: &Self::Model) -> Result<DeleteOutcome> {
        Ok(forget_warning("Localization"))
    }
}
