use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::product::ProductId;
use crate::offers::{apply_discount, time_remaining, TimeRemaining};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OfferId(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Percentage,
    Fixed,
    /// Multi-buy deals ("buy 2 get 1 free"), expressed as a percentage off the bundled price.
    Bundle,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    #[serde(default)]
    pub product_ids: Vec<ProductId>,
    #[serde(default)]
    pub is_flash_deal: bool,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Offer {
    /// Active and either open-ended or not yet expired.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at.map_or(true, |expires_at| expires_at > now)
    }

    pub fn applies_to(&self, product_id: &ProductId) -> bool {
        self.product_ids.iter().any(|id| id == product_id)
    }

    pub fn apply(&self, price: Decimal) -> Decimal {
        apply_discount(self.discount_type, self.discount_value, price)
    }

    pub fn time_remaining(&self, now: DateTime<Utc>) -> Option<TimeRemaining> {
        self.expires_at.map(|expires_at| time_remaining(expires_at, now))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    use crate::domain::product::ProductId;

    use super::{DiscountType, Offer, OfferId};

    fn offer(expires_in: Option<Duration>, is_active: bool) -> Offer {
        let now = Utc::now();
        Offer {
            id: OfferId("flash1".to_string()),
            title: "NeuroCharge Triple Pack".to_string(),
            description: "Buy 2 Get 1 Free".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::new(2_500, 2),
            product_ids: vec![ProductId("3".to_string())],
            is_flash_deal: true,
            expires_at: expires_in.map(|delta| now + delta),
            is_active,
            created_at: now,
        }
    }

    #[test]
    fn live_offer_requires_active_and_unexpired() {
        let now = Utc::now();

        assert!(offer(Some(Duration::hours(2)), true).is_live(now));
        assert!(offer(None, true).is_live(now));
        assert!(!offer(Some(Duration::hours(-1)), true).is_live(now));
        assert!(!offer(Some(Duration::hours(2)), false).is_live(now));
    }

    #[test]
    fn apply_uses_offer_discount() {
        let offer = offer(None, true);

        assert_eq!(offer.apply(Decimal::new(10_000, 2)), Decimal::new(7_500, 2));
        assert!(offer.applies_to(&ProductId("3".to_string())));
        assert!(!offer.applies_to(&ProductId("4".to_string())));
    }

    #[test]
    fn open_ended_offer_has_no_countdown() {
        assert_eq!(offer(None, true).time_remaining(Utc::now()), None);
    }
}
