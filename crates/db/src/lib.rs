pub mod fixtures;
pub mod repositories;
pub mod storefront;

pub use fixtures::{DemoDataset, SeedResult};
pub use repositories::RepositoryError;
pub use storefront::Storefront;
