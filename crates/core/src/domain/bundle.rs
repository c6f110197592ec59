use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::cognitive::BrainImpactVector;
use crate::domain::product::ProductId;
use crate::offers::savings_pct;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BundleId(pub String);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub id: BundleId,
    pub name: String,
    pub description: String,
    pub original_price: Decimal,
    pub bundle_price: Decimal,
    pub product_ids: Vec<ProductId>,
    #[serde(default)]
    pub predicted_impact: Option<BrainImpactVector>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Bundle {
    pub fn savings(&self) -> Decimal {
        (self.original_price - self.bundle_price).max(Decimal::ZERO)
    }

    pub fn savings_pct(&self) -> i64 {
        savings_pct(self.original_price, self.bundle_price)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use crate::domain::product::ProductId;

    use super::{Bundle, BundleId};

    #[test]
    fn savings_reflect_bundle_discount() {
        let bundle = Bundle {
            id: BundleId("bundle1".to_string()),
            name: "Focus + Memory Stack".to_string(),
            description: String::new(),
            original_price: Decimal::new(12_997, 2),
            bundle_price: Decimal::new(9_799, 2),
            product_ids: vec![ProductId("1".to_string()), ProductId("2".to_string())],
            predicted_impact: None,
            is_active: true,
            created_at: Utc::now(),
        };

        assert_eq!(bundle.savings(), Decimal::new(3_198, 2));
        assert_eq!(bundle.savings_pct(), 25);
    }
}
