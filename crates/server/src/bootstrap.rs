use neuroboutique_core::config::{AppConfig, ConfigError, LoadOptions};
use neuroboutique_db::{RepositoryError, Storefront};
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub store: Storefront,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("demo data seeding failed: {0}")]
    Seed(#[source] RepositoryError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let store = Storefront::in_memory();
    if config.storefront.seed_demo_data {
        let seeded = store
            .seed_demo(&config.storefront.demo_user_id)
            .await
            .map_err(BootstrapError::Seed)?;
        info!(
            event_name = "system.bootstrap.demo_seeded",
            correlation_id = "bootstrap",
            products = seeded.products,
            bundles = seeded.bundles,
            offers = seeded.offers,
            "demo catalog loaded"
        );
    } else {
        info!(
            event_name = "system.bootstrap.empty_store",
            correlation_id = "bootstrap",
            "demo seeding disabled; starting with an empty store"
        );
    }

    Ok(Application { config, store })
}

#[cfg(test)]
mod tests {
    use neuroboutique_core::config::{ConfigOverrides, LoadOptions};
    use neuroboutique_core::domain::user::UserId;

    use crate::bootstrap::bootstrap;

    fn options(overrides: ConfigOverrides) -> LoadOptions {
        LoadOptions { overrides, ..LoadOptions::default() }
    }

    #[tokio::test]
    async fn bootstrap_fails_fast_on_invalid_storefront_settings() {
        let result = bootstrap(options(ConfigOverrides {
            recommendation_limit: Some(0),
            ..ConfigOverrides::default()
        }))
        .await;

        let message = result.err().expect("error").to_string();
        assert!(message.contains("storefront.recommendation_limit"));
    }

    #[tokio::test]
    async fn bootstrap_seeds_demo_catalog_and_user() {
        let app = bootstrap(options(ConfigOverrides {
            seed_demo_data: Some(true),
            ..ConfigOverrides::default()
        }))
        .await
        .expect("bootstrap should succeed with defaults");

        let products = app.store.products.list().await.expect("products");
        assert_eq!(products.len(), 5);
        let demo_user = app
            .store
            .users
            .find_by_id(&UserId(app.config.storefront.demo_user_id.clone()))
            .await
            .expect("lookup");
        assert!(demo_user.is_some());
    }

    #[tokio::test]
    async fn bootstrap_can_start_empty() {
        let app = bootstrap(options(ConfigOverrides {
            seed_demo_data: Some(false),
            ..ConfigOverrides::default()
        }))
        .await
        .expect("bootstrap");

        assert!(app.store.products.list().await.expect("products").is_empty());
        assert!(app.store.bundles.list().await.expect("bundles").is_empty());
    }
}
