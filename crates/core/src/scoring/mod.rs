//! Brain-impact scoring engine
//!
//! Pure functions that personalize a product's catalog score against a user's
//! cognitive profile and aggregate the predicted impact of a cart. Every function
//! here is total: missing scores and impacts count as zero, nothing returns an error.

mod impact;
mod personalize;

pub use impact::{brain_impact, overall_wellness_score, CartLine};
pub use personalize::{
    badge_for, personalized_score, recommendation_badge, weak_dimensions, weakest_dimension,
    RecommendationIntensity,
};

/// Profile values strictly below this are weak areas eligible for a boost.
pub const WEAK_AREA_THRESHOLD: f64 = 80.0;

/// Weight applied to a product's impact on a weak area.
pub const WEAK_AREA_MULTIPLIER: f64 = 2.0;

/// Upper bound of a personalized match score.
pub const MAX_MATCH_SCORE: f64 = 100.0;

/// Upper bound of a single dimension of an aggregated cart impact.
pub const MAX_DIMENSION_IMPACT: f64 = 50.0;

/// Upper bound of the headline wellness figure. Unreachable while dimensions are
/// capped at [`MAX_DIMENSION_IMPACT`], kept for vectors built elsewhere.
pub const MAX_WELLNESS_SCORE: f64 = 100.0;

/// Badge shown when a product does not target the user's weakest dimension.
pub const GENERIC_BADGE: &str = "AI Recommended";
