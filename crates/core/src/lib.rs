pub mod assessment;
pub mod checkout;
pub mod config;
pub mod domain;
pub mod errors;
pub mod loyalty;
pub mod offers;
pub mod recommendations;
pub mod scoring;

pub use checkout::{price_cart, summarize, CheckoutLine, CheckoutSummary};
pub use domain::bundle::{Bundle, BundleId};
pub use domain::cognitive::{BrainImpactVector, CognitiveProfile, Dimension, NeuralImpact};
pub use domain::offer::{DiscountType, Offer, OfferId};
pub use domain::order::{NewOrder, Order, OrderId, OrderItem, OrderStatus};
pub use domain::product::{Category, Product, ProductId};
pub use domain::reward::{ActivityType, NewReward, RewardId, UserReward};
pub use domain::user::{NewUser, User, UserId};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use loyalty::{LoyaltyTier, PointsSummary};
pub use offers::{BundleListing, OfferListing};
pub use recommendations::{PersonalizedSelector, Recommendation, RecommendationSelector};
