//! Cart-level brain impact aggregation

use super::{MAX_DIMENSION_IMPACT, MAX_WELLNESS_SCORE};
use crate::domain::cognitive::{BrainImpactVector, Dimension};
use crate::domain::product::Product;

/// A product and how many of it sit in the cart.
#[derive(Debug, Clone, Copy)]
pub struct CartLine<'a> {
    pub product: &'a Product,
    pub quantity: u32,
}

impl<'a> CartLine<'a> {
    pub fn new(product: &'a Product, quantity: u32) -> Self {
        Self { product, quantity }
    }
}

/// Sums `impact * quantity` per dimension across the cart, then caps each
/// dimension at [`MAX_DIMENSION_IMPACT`]. The cap applies once to the full sum.
pub fn brain_impact(lines: &[CartLine<'_>]) -> BrainImpactVector {
    let mut impact = BrainImpactVector::zero();

    for line in lines {
        let quantity = f64::from(line.quantity);
        for dimension in Dimension::ORDERED {
            *impact.get_mut(dimension) += line.product.impact(dimension) * quantity;
        }
    }

    for dimension in Dimension::ORDERED {
        let slot = impact.get_mut(dimension);
        *slot = slot.min(MAX_DIMENSION_IMPACT);
    }

    impact
}

/// Headline "+N%" figure: the rounded mean of the five dimensions, kept in 0..=100.
pub fn overall_wellness_score(impact: &BrainImpactVector) -> u32 {
    let mean = impact.total() / Dimension::ORDERED.len() as f64;
    // NaN saturates to 0 on the cast
    mean.round().clamp(0.0, MAX_WELLNESS_SCORE) as u32
}
