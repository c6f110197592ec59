//! Recommendation selector
//!
//! Ranks a catalog for a user with the scoring engine and returns the top entries.
//! Users without a cognitive profile get the head of the catalog in its stored order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::cognitive::{CognitiveProfile, Dimension};
use crate::domain::product::{Product, ProductId};
use crate::scoring::{
    personalized_score, recommendation_badge, weak_dimensions, RecommendationIntensity,
    GENERIC_BADGE,
};

/// Number of recommendations the storefront widgets render.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 4;

const CATALOG_REASON: &str = "Top rated in the catalog";

pub trait RecommendationSelector: Send + Sync {
    fn recommend(
        &self,
        catalog: &[Product],
        profile: Option<&CognitiveProfile>,
        limit: usize,
    ) -> Vec<Product>;
}

/// Ranks by personalized score, falling back to catalog order without a profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonalizedSelector;

impl RecommendationSelector for PersonalizedSelector {
    fn recommend(
        &self,
        catalog: &[Product],
        profile: Option<&CognitiveProfile>,
        limit: usize,
    ) -> Vec<Product> {
        recommend(catalog, profile, limit)
    }
}

/// Top `limit` products for `profile`.
///
/// Returned products carry their personalized score in `ai_score`. The sort is
/// stable, so equal scores keep catalog order.
pub fn recommend(
    catalog: &[Product],
    profile: Option<&CognitiveProfile>,
    limit: usize,
) -> Vec<Product> {
    let Some(profile) = profile else {
        return catalog.iter().take(limit).cloned().collect();
    };

    let mut ranked: Vec<Product> = catalog
        .iter()
        .map(|product| {
            let mut personalized = product.clone();
            personalized.ai_score = Some(personalized_score(product, profile));
            personalized
        })
        .collect();

    ranked.sort_by(|a, b| b.base_score().partial_cmp(&a.base_score()).unwrap_or(Ordering::Equal));
    ranked.truncate(limit);
    ranked
}

/// A ranked product with the presentation text the recommendation widgets show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub product_id: ProductId,
    pub product_name: String,
    pub score: f64,
    pub badge: String,
    pub intensity: RecommendationIntensity,
    pub reason: String,
}

/// Same ranking as [`recommend`], annotated with badge, intensity, and reason.
pub fn explain(
    catalog: &[Product],
    profile: Option<&CognitiveProfile>,
    limit: usize,
) -> Vec<Recommendation> {
    recommend(catalog, profile, limit)
        .into_iter()
        .map(|product| {
            let score = product.base_score();
            let (badge, reason) = match profile {
                Some(profile) => {
                    (recommendation_badge(&product, profile), targeting_reason(&product, profile))
                }
                None => (GENERIC_BADGE, CATALOG_REASON.to_string()),
            };

            Recommendation {
                product_id: product.id,
                product_name: product.name,
                score,
                badge: badge.to_string(),
                intensity: RecommendationIntensity::from_score(score),
                reason,
            }
        })
        .collect()
}

fn targeting_reason(product: &Product, profile: &CognitiveProfile) -> String {
    let targeted: Vec<&str> = weak_dimensions(profile)
        .filter(|dimension| product.impact(*dimension) != 0.0)
        .map(|dimension: Dimension| dimension.as_str())
        .collect();

    if targeted.is_empty() {
        CATALOG_REASON.to_string()
    } else {
        format!("Targets your {}", targeted.join(" and "))
    }
}
