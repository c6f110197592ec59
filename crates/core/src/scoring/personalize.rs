//! Per-product personalization against a cognitive profile

use serde::{Deserialize, Serialize};

use super::{GENERIC_BADGE, MAX_MATCH_SCORE, WEAK_AREA_MULTIPLIER, WEAK_AREA_THRESHOLD};
use crate::domain::cognitive::{CognitiveProfile, Dimension};
use crate::domain::product::Product;

/// How strongly a personalized score should be surfaced in the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationIntensity {
    /// Score >= 90
    High,
    /// Score 75 - 89
    Medium,
    /// Score below 75
    Low,
}

impl RecommendationIntensity {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            RecommendationIntensity::High
        } else if score >= 75.0 {
            RecommendationIntensity::Medium
        } else {
            RecommendationIntensity::Low
        }
    }
}

/// Dimensions where the user sits below the weak-area threshold, in canonical order.
pub fn weak_dimensions(profile: &CognitiveProfile) -> impl Iterator<Item = Dimension> + '_ {
    Dimension::ORDERED
        .into_iter()
        .filter(move |dimension| profile.value(*dimension) < WEAK_AREA_THRESHOLD)
}

/// Personalized match score for `product`, capped at [`MAX_MATCH_SCORE`].
///
/// Starts from the stored catalog score and adds twice the product's impact on
/// every dimension where the user is weak. Impact on dimensions the user already
/// scores >= 80 on is ignored.
pub fn personalized_score(product: &Product, profile: &CognitiveProfile) -> f64 {
    let boost: f64 = weak_dimensions(profile)
        .map(|dimension| product.impact(dimension))
        .filter(|impact| *impact != 0.0)
        .map(|impact| impact * WEAK_AREA_MULTIPLIER)
        .sum();

    (product.base_score() + boost).min(MAX_MATCH_SCORE)
}

/// Lowest-valued dimension. Ties go to the first in [`Dimension::ORDERED`].
pub fn weakest_dimension(profile: &CognitiveProfile) -> Dimension {
    let mut weakest = Dimension::ORDERED[0];
    for dimension in Dimension::ORDERED.into_iter().skip(1) {
        if profile.value(dimension) < profile.value(weakest) {
            weakest = dimension;
        }
    }
    weakest
}

pub fn badge_for(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Memory => "Best for Your Memory",
        Dimension::Focus => "Focus Booster Recommended",
        Dimension::Sleep => "Sleep Enhancer for Tonight",
        Dimension::Energy => "Energy Booster",
        Dimension::Mood => "Mood Enhancer",
    }
}

pub fn recommendation_badge(product: &Product, profile: &CognitiveProfile) -> &'static str {
    let weakest = weakest_dimension(profile);
    if product.impact(weakest) != 0.0 {
        badge_for(weakest)
    } else {
        GENERIC_BADGE
    }
}
