use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::fixtures::{DemoDataset, SeedResult};
use crate::repositories::{
    BundleRepository, InMemoryBundleRepository, InMemoryOfferRepository, InMemoryOrderRepository,
    InMemoryProductRepository, InMemoryRewardRepository, InMemoryUserRepository, OfferRepository,
    OrderRepository, ProductRepository, RepositoryError, RewardRepository, UserRepository,
};

/// One handle per repository, shared by the HTTP layer and the CLI.
#[derive(Clone)]
pub struct Storefront {
    pub users: Arc<dyn UserRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub bundles: Arc<dyn BundleRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub offers: Arc<dyn OfferRepository>,
    pub rewards: Arc<dyn RewardRepository>,
}

impl Storefront {
    pub fn in_memory() -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::default());
        Self {
            rewards: Arc::new(InMemoryRewardRepository::new(users.clone())),
            users,
            products: Arc::new(InMemoryProductRepository::default()),
            bundles: Arc::new(InMemoryBundleRepository::default()),
            orders: Arc::new(InMemoryOrderRepository::default()),
            offers: Arc::new(InMemoryOfferRepository::default()),
        }
    }

    /// An in-memory store already holding the demo dataset.
    pub async fn demo(demo_user_id: &str) -> Result<Self, RepositoryError> {
        let store = Self::in_memory();
        store.seed_demo(demo_user_id).await?;
        Ok(store)
    }

    /// Loads the demo dataset. Re-seeding replaces entries by id rather than duplicating them.
    pub async fn seed_demo(&self, demo_user_id: &str) -> Result<SeedResult, RepositoryError> {
        let dataset = DemoDataset::build(Utc::now(), demo_user_id);
        let counts = dataset.counts();

        for product in dataset.products {
            self.products.save(product).await?;
        }
        for bundle in dataset.bundles {
            self.bundles.save(bundle).await?;
        }
        for offer in dataset.offers {
            self.offers.save(offer).await?;
        }
        self.users.save(dataset.user).await?;

        info!(
            event_name = "storefront.seed.completed",
            products = counts.products,
            bundles = counts.bundles,
            offers = counts.offers,
            demo_user_id,
            "demo dataset loaded"
        );
        Ok(counts)
    }
}
