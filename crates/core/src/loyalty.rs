//! Neural points and loyalty tiers

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Points awarded per dollar spent unless configured otherwise.
pub const DEFAULT_POINTS_PER_DOLLAR: u32 = 10;

/// Points awarded for completing a cognitive assessment.
pub const ASSESSMENT_POINTS: u64 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoyaltyTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl LoyaltyTier {
    /// Inclusive lower bound of the tier's point band.
    pub fn min_points(&self) -> u64 {
        match self {
            Self::Bronze => 0,
            Self::Silver => 1_000,
            Self::Gold => 5_000,
            Self::Platinum => 15_000,
        }
    }

    /// Upper bound of the band used for progress display.
    pub fn max_points(&self) -> u64 {
        match self {
            Self::Bronze => 1_000,
            Self::Silver => 5_000,
            Self::Gold => 15_000,
            Self::Platinum => 50_000,
        }
    }

    pub fn next(&self) -> Option<LoyaltyTier> {
        match self {
            Self::Bronze => Some(Self::Silver),
            Self::Silver => Some(Self::Gold),
            Self::Gold => Some(Self::Platinum),
            Self::Platinum => None,
        }
    }

    /// Checkout discount in percent.
    pub fn discount_pct(&self) -> Decimal {
        match self {
            Self::Bronze => Decimal::ZERO,
            Self::Silver => Decimal::from(10),
            Self::Gold => Decimal::from(15),
            Self::Platinum => Decimal::from(20),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }
}

impl fmt::Display for LoyaltyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn tier_for_points(points: u64) -> LoyaltyTier {
    [LoyaltyTier::Platinum, LoyaltyTier::Gold, LoyaltyTier::Silver]
        .into_iter()
        .find(|tier| points >= tier.min_points())
        .unwrap_or(LoyaltyTier::Bronze)
}

/// Percentage through `tier`'s band, clamped to 0..=100.
pub fn tier_progress(points: u64, tier: LoyaltyTier) -> f64 {
    let min = tier.min_points() as f64;
    let span = (tier.max_points() - tier.min_points()) as f64;
    let progress = (points as f64 - min) / span * 100.0;
    progress.clamp(0.0, 100.0)
}

/// Points still needed to reach the next tier; `None` at the top tier.
pub fn points_to_next_tier(points: u64) -> Option<u64> {
    tier_for_points(points).next().map(|next| next.min_points().saturating_sub(points))
}

/// `floor(total * points_per_dollar)`. Non-positive totals, and totals too large to
/// multiply, earn nothing.
pub fn points_for_purchase(total: Decimal, points_per_dollar: u32) -> u64 {
    total
        .checked_mul(Decimal::from(points_per_dollar))
        .and_then(|points| points.floor().to_u64())
        .unwrap_or(0)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsSummary {
    pub points: u64,
    pub tier: LoyaltyTier,
    pub tier_progress: f64,
    pub points_to_next_tier: Option<u64>,
}

impl PointsSummary {
    pub fn for_points(points: u64) -> Self {
        let tier = tier_for_points(points);
        Self {
            points,
            tier,
            tier_progress: tier_progress(points, tier),
            points_to_next_tier: points_to_next_tier(points),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn tiers_follow_point_thresholds() {
        assert_eq!(tier_for_points(0), LoyaltyTier::Bronze);
        assert_eq!(tier_for_points(999), LoyaltyTier::Bronze);
        assert_eq!(tier_for_points(1_000), LoyaltyTier::Silver);
        assert_eq!(tier_for_points(5_000), LoyaltyTier::Gold);
        assert_eq!(tier_for_points(18_750), LoyaltyTier::Platinum);
    }

    #[test]
    fn progress_is_clamped_to_band() {
        assert_eq!(tier_progress(10_000, LoyaltyTier::Gold), 50.0);
        assert_eq!(tier_progress(18_750, LoyaltyTier::Gold), 100.0);
        assert_eq!(tier_progress(200, LoyaltyTier::Silver), 0.0);
    }

    #[test]
    fn points_to_next_tier_stops_at_platinum() {
        assert_eq!(points_to_next_tier(13_750), Some(1_250));
        assert_eq!(points_to_next_tier(0), Some(1_000));
        assert_eq!(points_to_next_tier(20_000), None);
    }

    #[test]
    fn purchase_points_floor_the_total() {
        assert_eq!(points_for_purchase(Decimal::new(11_047, 2), DEFAULT_POINTS_PER_DOLLAR), 1_104);
        assert_eq!(points_for_purchase(Decimal::ZERO, DEFAULT_POINTS_PER_DOLLAR), 0);
        assert_eq!(points_for_purchase(Decimal::new(-500, 2), DEFAULT_POINTS_PER_DOLLAR), 0);
    }

    #[test]
    fn purchase_points_do_not_overflow_on_huge_totals() {
        assert_eq!(points_for_purchase(Decimal::MAX, DEFAULT_POINTS_PER_DOLLAR), 0);
        assert_eq!(points_for_purchase(Decimal::MAX, 1), 0);
    }

    #[test]
    fn tier_discounts_increase_with_tier() {
        let discounts: Vec<_> =
            [LoyaltyTier::Bronze, LoyaltyTier::Silver, LoyaltyTier::Gold, LoyaltyTier::Platinum]
                .iter()
                .map(LoyaltyTier::discount_pct)
                .collect();

        assert_eq!(discounts[2], Decimal::from(15));
        assert!(discounts.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn summary_combines_tier_fields() {
        let summary = PointsSummary::for_points(2_450);

        assert_eq!(summary.tier, LoyaltyTier::Silver);
        assert_eq!(summary.points_to_next_tier, Some(2_550));
        assert!((summary.tier_progress - 36.25).abs() < 1e-9);
    }
}
