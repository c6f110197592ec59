use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use neuroboutique_core::domain::bundle::{Bundle, BundleId};
use neuroboutique_core::domain::cognitive::CognitiveProfile;
use neuroboutique_core::domain::offer::Offer;
use neuroboutique_core::domain::order::{NewOrder, Order, OrderId, OrderStatus};
use neuroboutique_core::domain::product::{Category, Product, ProductId};
use neuroboutique_core::domain::reward::{NewReward, RewardId, UserReward};
use neuroboutique_core::domain::user::{NewUser, User, UserId};

use super::{
    BundleRepository, OfferRepository, OrderRepository, ProductRepository, RepositoryError,
    RewardRepository, UserRepository,
};

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Replaces the entry matching `same` in place, or appends it.
fn upsert<T>(entries: &mut Vec<T>, entry: T, same: impl Fn(&T) -> bool) {
    match entries.iter_mut().find(|existing| same(existing)) {
        Some(existing) => *existing = entry,
        None => entries.push(entry),
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    async fn modify(
        &self,
        id: &UserId,
        change: impl FnOnce(&mut User) + Send,
    ) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|user| &user.id == id)
            .ok_or_else(|| RepositoryError::NotFound("User".to_string()))?;
        change(user);
        Ok(user.clone())
    }
}

#[async_trait::async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| &user.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.email == email).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;
        if users.iter().any(|user| user.email == new_user.email) {
            return Err(RepositoryError::Conflict(format!(
                "a user with email `{}` already exists",
                new_user.email
            )));
        }

        let user = User::register(UserId(new_id()), new_user);
        users.push(user.clone());
        Ok(user)
    }

    async fn save(&self, user: User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        let id = user.id.clone();
        upsert(&mut *users, user, |existing| existing.id == id);
        Ok(())
    }

    async fn update_profile(
        &self,
        id: &UserId,
        profile: CognitiveProfile,
    ) -> Result<User, RepositoryError> {
        self.modify(id, |user| user.cognitive_profile = Some(profile)).await
    }

    async fn add_points(&self, id: &UserId, points: u64) -> Result<User, RepositoryError> {
        self.modify(id, |user| user.credit_points(points)).await
    }
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.products.read().await.clone())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|product| &product.id == id).cloned())
    }

    async fn list_by_category(&self, category: Category) -> Result<Vec<Product>, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.iter().filter(|product| product.category == category).cloned().collect())
    }

    async fn save(&self, product: Product) -> Result<(), RepositoryError> {
        let mut products = self.products.write().await;
        let id = product.id.clone();
        upsert(&mut *products, product, |existing| existing.id == id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryBundleRepository {
    bundles: RwLock<Vec<Bundle>>,
}

#[async_trait::async_trait]
impl BundleRepository for InMemoryBundleRepository {
    async fn list(&self) -> Result<Vec<Bundle>, RepositoryError> {
        Ok(self.bundles.read().await.clone())
    }

    async fn find_by_id(&self, id: &BundleId) -> Result<Option<Bundle>, RepositoryError> {
        let bundles = self.bundles.read().await;
        Ok(bundles.iter().find(|bundle| &bundle.id == id).cloned())
    }

    async fn list_active(&self) -> Result<Vec<Bundle>, RepositoryError> {
        let bundles = self.bundles.read().await;
        Ok(bundles.iter().filter(|bundle| bundle.is_active).cloned().collect())
    }

    async fn save(&self, bundle: Bundle) -> Result<(), RepositoryError> {
        let mut bundles = self.bundles.write().await;
        let id = bundle.id.clone();
        upsert(&mut *bundles, bundle, |existing| existing.id == id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<Vec<Order>>,
}

#[async_trait::async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, new_order: NewOrder) -> Result<Order, RepositoryError> {
        let order = Order::place(OrderId(new_id()), new_order);
        self.orders.write().await.push(order.clone());
        Ok(order)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .filter(|order| order.user_id.as_ref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let mut orders = self.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|order| &order.id == id)
            .ok_or_else(|| RepositoryError::NotFound("Order".to_string()))?;
        order.transition_to(status)?;
        Ok(order.clone())
    }
}

#[derive(Default)]
pub struct InMemoryOfferRepository {
    offers: RwLock<Vec<Offer>>,
}

#[async_trait::async_trait]
impl OfferRepository for InMemoryOfferRepository {
    async fn list_active(&self, now: DateTime<Utc>) -> Result<Vec<Offer>, RepositoryError> {
        let offers = self.offers.read().await;
        Ok(offers.iter().filter(|offer| offer.is_live(now)).cloned().collect())
    }

    async fn list_flash_deals(&self, now: DateTime<Utc>) -> Result<Vec<Offer>, RepositoryError> {
        let offers = self.offers.read().await;
        Ok(offers
            .iter()
            .filter(|offer| offer.is_flash_deal && offer.is_live(now))
            .cloned()
            .collect())
    }

    async fn save(&self, offer: Offer) -> Result<(), RepositoryError> {
        let mut offers = self.offers.write().await;
        let id = offer.id.clone();
        upsert(&mut *offers, offer, |existing| existing.id == id);
        Ok(())
    }
}

/// Reward history; crediting goes through the shared user repository so balances and
/// tiers stay in step with the ledger.
pub struct InMemoryRewardRepository {
    rewards: RwLock<Vec<UserReward>>,
    users: Arc<dyn UserRepository>,
}

impl InMemoryRewardRepository {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { rewards: RwLock::new(Vec::new()), users }
    }
}

#[async_trait::async_trait]
impl RewardRepository for InMemoryRewardRepository {
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UserReward>, RepositoryError> {
        let rewards = self.rewards.read().await;
        Ok(rewards.iter().filter(|reward| &reward.user_id == user_id).cloned().collect())
    }

    async fn add(&self, reward: NewReward) -> Result<UserReward, RepositoryError> {
        self.users.add_points(&reward.user_id, reward.points_earned).await?;

        let reward = UserReward {
            id: RewardId(new_id()),
            user_id: reward.user_id,
            activity_type: reward.activity_type,
            points_earned: reward.points_earned,
            description: reward.description,
            created_at: Utc::now(),
        };
        self.rewards.write().await.push(reward.clone());
        Ok(reward)
    }
}
