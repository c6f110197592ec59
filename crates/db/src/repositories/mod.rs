use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use neuroboutique_core::domain::bundle::{Bundle, BundleId};
use neuroboutique_core::domain::cognitive::CognitiveProfile;
use neuroboutique_core::domain::offer::Offer;
use neuroboutique_core::domain::order::{NewOrder, Order, OrderId, OrderStatus};
use neuroboutique_core::domain::product::{Category, Product, ProductId};
use neuroboutique_core::domain::reward::{NewReward, UserReward};
use neuroboutique_core::domain::user::{NewUser, User, UserId};
use neuroboutique_core::errors::{ApplicationError, DomainError};

pub mod memory;

pub use memory::{
    InMemoryBundleRepository, InMemoryOfferRepository, InMemoryOrderRepository,
    InMemoryProductRepository, InMemoryRewardRepository, InMemoryUserRepository,
};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<RepositoryError> for ApplicationError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound(resource) => Self::NotFound(resource),
            RepositoryError::Conflict(message) => Self::Conflict(message),
            RepositoryError::Domain(error) => Self::Domain(error),
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    /// Registers a new shopper under a fresh UUID. Emails are unique.
    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError>;
    /// Inserts or replaces a user under its existing id.
    async fn save(&self, user: User) -> Result<(), RepositoryError>;
    async fn update_profile(
        &self,
        id: &UserId,
        profile: CognitiveProfile,
    ) -> Result<User, RepositoryError>;
    async fn add_points(&self, id: &UserId, points: u64) -> Result<User, RepositoryError>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every product, in insertion order.
    async fn list(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;
    async fn list_by_category(&self, category: Category) -> Result<Vec<Product>, RepositoryError>;
    async fn save(&self, product: Product) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait BundleRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Bundle>, RepositoryError>;
    async fn find_by_id(&self, id: &BundleId) -> Result<Option<Bundle>, RepositoryError>;
    async fn list_active(&self) -> Result<Vec<Bundle>, RepositoryError>;
    async fn save(&self, bundle: Bundle) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, new_order: NewOrder) -> Result<Order, RepositoryError>;
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError>;
    /// Moves an order along its lifecycle; illegal moves surface as `RepositoryError::Domain`.
    async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError>;
}

#[async_trait]
pub trait OfferRepository: Send + Sync {
    async fn list_active(&self, now: DateTime<Utc>) -> Result<Vec<Offer>, RepositoryError>;
    async fn list_flash_deals(&self, now: DateTime<Utc>) -> Result<Vec<Offer>, RepositoryError>;
    async fn save(&self, offer: Offer) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait RewardRepository: Send + Sync {
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UserReward>, RepositoryError>;
    /// Records a reward and credits its points to the user's balance.
    async fn add(&self, reward: NewReward) -> Result<UserReward, RepositoryError>;
}
