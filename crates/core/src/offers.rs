//! Discount arithmetic shared by offers, bundles, and flash deals

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::bundle::Bundle;
use crate::domain::offer::{DiscountType, Offer};
use crate::domain::product::ProductId;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Whole-percent saving of `sale` against `original`, rounded half away from zero.
/// A zero original price yields 0 rather than dividing by zero.
pub fn savings_pct(original: Decimal, sale: Decimal) -> i64 {
    if original.is_zero() {
        return 0;
    }

    ((original - sale) / original * HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

/// Discounted price rounded to cents, never below zero.
pub fn apply_discount(discount_type: DiscountType, value: Decimal, price: Decimal) -> Decimal {
    let discounted = match discount_type {
        DiscountType::Percentage | DiscountType::Bundle => price - price * value / HUNDRED,
        DiscountType::Fixed => price - value,
    };

    discounted.max(Decimal::ZERO).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRemaining {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Countdown to `expires_at`; all zero once it has passed.
pub fn time_remaining(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> TimeRemaining {
    let remaining = expires_at - now;
    let total_seconds = remaining.num_seconds();
    if total_seconds <= 0 {
        return TimeRemaining::default();
    }

    TimeRemaining {
        hours: total_seconds / 3_600,
        minutes: (total_seconds % 3_600) / 60,
        seconds: total_seconds % 60,
    }
}

/// Lowest price any live offer gives `product_id`; `price` itself when none applies.
pub fn best_offer_price(
    offers: &[Offer],
    product_id: &ProductId,
    price: Decimal,
    now: DateTime<Utc>,
) -> Decimal {
    offers
        .iter()
        .filter(|offer| offer.is_live(now) && offer.applies_to(product_id))
        .map(|offer| offer.apply(price))
        .fold(price, |best, candidate| best.min(candidate))
}

/// A bundle as the storefront shows it, with what the shopper saves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleListing {
    #[serde(flatten)]
    pub bundle: Bundle,
    pub savings: Decimal,
    pub savings_pct: i64,
}

impl From<Bundle> for BundleListing {
    fn from(bundle: Bundle) -> Self {
        Self { savings: bundle.savings(), savings_pct: bundle.savings_pct(), bundle }
    }
}

/// An offer with its countdown at `now`. Open-ended offers carry no countdown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferListing {
    #[serde(flatten)]
    pub offer: Offer,
    pub time_remaining: Option<TimeRemaining>,
}

impl OfferListing {
    pub fn at(offer: Offer, now: DateTime<Utc>) -> Self {
        Self { time_remaining: offer.time_remaining(now), offer }
    }
}
