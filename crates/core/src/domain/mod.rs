pub mod bundle;
pub mod cognitive;
pub mod offer;
pub mod order;
pub mod product;
pub mod reward;
pub mod user;
