use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::cognitive::BrainImpactVector;
use crate::domain::product::ProductId;
use crate::loyalty::{points_for_purchase, LoyaltyTier};
use crate::scoring::{brain_impact, overall_wellness_score, CartLine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
    pub product_id: ProductId,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl From<&CartLine<'_>> for CheckoutLine {
    fn from(line: &CartLine<'_>) -> Self {
        Self {
            product_id: line.product.id.clone(),
            unit_price: line.product.price,
            quantity: line.quantity,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutTraceStep {
    pub stage: String,
    pub detail: String,
    pub amount: Decimal,
}

/// Totals and predicted impact shown on the checkout page before payment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub subtotal: Decimal,
    pub tier: LoyaltyTier,
    pub tier_discount_pct: Decimal,
    pub discount_total: Decimal,
    pub shipping_total: Decimal,
    pub total: Decimal,
    pub points_earned: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brain_impact: Option<BrainImpactVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wellness_score: Option<u32>,
    pub trace: Vec<CheckoutTraceStep>,
}

pub fn subtotal(lines: &[CheckoutLine]) -> Decimal {
    lines.iter().map(|line| line.unit_price * Decimal::from(line.quantity)).sum()
}

/// Prices a cart for a shopper of `tier`. Shipping is always free.
pub fn price_cart(
    lines: &[CheckoutLine],
    tier: LoyaltyTier,
    points_per_dollar: u32,
) -> CheckoutSummary {
    let subtotal = subtotal(lines);
    let tier_discount_pct = tier.discount_pct();
    let discount_total = (subtotal * tier_discount_pct / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let shipping_total = Decimal::ZERO;
    let total = subtotal - discount_total + shipping_total;

    CheckoutSummary {
        subtotal,
        tier,
        tier_discount_pct,
        discount_total,
        shipping_total,
        total,
        points_earned: points_for_purchase(total, points_per_dollar),
        brain_impact: None,
        wellness_score: None,
        trace: vec![
            CheckoutTraceStep {
                stage: "subtotal".to_string(),
                detail: format!("{} line(s)", lines.len()),
                amount: subtotal,
            },
            CheckoutTraceStep {
                stage: "tier_discount".to_string(),
                detail: format!("{tier} tier {tier_discount_pct}%"),
                amount: -discount_total,
            },
            CheckoutTraceStep {
                stage: "shipping".to_string(),
                detail: "free shipping".to_string(),
                amount: shipping_total,
            },
        ],
    }
}

/// [`price_cart`] plus the predicted brain impact of the cart.
pub fn summarize(
    lines: &[CartLine<'_>],
    tier: LoyaltyTier,
    points_per_dollar: u32,
) -> CheckoutSummary {
    let priced: Vec<CheckoutLine> = lines.iter().map(CheckoutLine::from).collect();
    let impact = brain_impact(lines);

    CheckoutSummary {
        brain_impact: Some(impact),
        wellness_score: Some(overall_wellness_score(&impact)),
        ..price_cart(&priced, tier, points_per_dollar)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::cognitive::{Dimension, NeuralImpact};
    use crate::domain::product::{Category, Product, ProductId};
    use crate::loyalty::{LoyaltyTier, DEFAULT_POINTS_PER_DOLLAR};
    use crate::scoring::CartLine;

    use super::{price_cart, summarize, CheckoutLine};

    fn capsules() -> Product {
        Product::new("1", "NeuroFocus Capsules", Category::Focus, Decimal::new(4_999, 2))
            .with_impact(
                NeuralImpact::default().with(Dimension::Focus, 20.0).with(Dimension::Memory, 5.0),
            )
    }

    fn gummies() -> Product {
        Product::new("2", "Cogniva Memory Gummies", Category::Memory, Decimal::new(2_999, 2))
            .with_impact(
                NeuralImpact::default().with(Dimension::Memory, 15.0).with(Dimension::Focus, 8.0),
            )
    }

    #[test]
    fn gold_tier_gets_fifteen_percent_off() {
        let capsules = capsules();
        let gummies = gummies();
        let lines = [CartLine::new(&capsules, 1), CartLine::new(&gummies, 2)];

        let summary = summarize(&lines, LoyaltyTier::Gold, DEFAULT_POINTS_PER_DOLLAR);

        assert_eq!(summary.subtotal, Decimal::new(10_997, 2));
        assert_eq!(summary.discount_total, Decimal::new(1_650, 2));
        assert_eq!(summary.total, Decimal::new(9_347, 2));
        assert_eq!(summary.shipping_total, Decimal::ZERO);
        assert_eq!(summary.points_earned, 934);
        assert_eq!(summary.trace.len(), 3);
    }

    #[test]
    fn summary_carries_brain_impact_and_wellness() {
        let capsules = capsules();
        let gummies = gummies();
        let lines = [CartLine::new(&capsules, 1), CartLine::new(&gummies, 2)];

        let summary = summarize(&lines, LoyaltyTier::Bronze, DEFAULT_POINTS_PER_DOLLAR);

        let impact = summary.brain_impact.expect("impact attached");
        assert_eq!(impact.memory, 35.0);
        assert_eq!(impact.focus, 36.0);
        assert_eq!(summary.wellness_score, Some(14));
        assert_eq!(summary.discount_total, Decimal::ZERO);
        assert_eq!(summary.total, summary.subtotal);
    }

    #[test]
    fn empty_cart_is_free_and_neutral() {
        let summary = summarize(&[], LoyaltyTier::Platinum, DEFAULT_POINTS_PER_DOLLAR);

        assert_eq!(summary.total, Decimal::ZERO);
        assert_eq!(summary.points_earned, 0);
        assert_eq!(summary.wellness_score, Some(0));
    }

    #[test]
    fn price_cart_rounds_discount_to_cents() {
        let lines = [CheckoutLine {
            product_id: ProductId("3".to_string()),
            unit_price: Decimal::new(3_499, 2),
            quantity: 1,
        }];

        let summary = price_cart(&lines, LoyaltyTier::Silver, DEFAULT_POINTS_PER_DOLLAR);

        // 10% of 34.99 is 3.499
        assert_eq!(summary.discount_total, Decimal::new(350, 2));
        assert_eq!(summary.total, Decimal::new(3_149, 2));
        assert_eq!(summary.points_earned, 314);
        assert!(summary.brain_impact.is_none());
    }
}
