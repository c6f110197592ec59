use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::cognitive::BrainImpactVector;
use crate::domain::product::ProductId;
use crate::domain::user::UserId;
use crate::errors::DomainError;

/// Largest order total the storefront accepts.
pub const MAX_ORDER_TOTAL: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 2);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: Option<UserId>,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub predicted_brain_impact: Option<BrainImpactVector>,
    pub created_at: DateTime<Utc>,
}

/// An order as submitted at checkout, before the store assigns id and status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    #[serde(default)]
    pub predicted_brain_impact: Option<BrainImpactVector>,
}

impl NewOrder {
    /// Sum of `price * quantity` over the items; `None` if the arithmetic overflows.
    pub fn items_total(&self) -> Option<Decimal> {
        self.items.iter().try_fold(Decimal::ZERO, |total, item| {
            item.price.checked_mul(Decimal::from(item.quantity))?.checked_add(total)
        })
    }

    /// Every item needs a positive quantity and a non-negative price. The total must be
    /// non-negative, at most [`MAX_ORDER_TOTAL`], and no more than the items are worth.
    pub fn validate(&self) -> Result<(), DomainError> {
        let violation = |message: String| Err(DomainError::InvariantViolation(message));

        if self.items.is_empty() {
            return violation("an order needs at least one item".to_string());
        }
        for item in &self.items {
            if item.quantity == 0 {
                return violation(format!("item `{}` has zero quantity", item.product_id));
            }
            if item.price.is_sign_negative() {
                return violation(format!("item `{}` has a negative price", item.product_id));
            }
        }
        if self.total_amount.is_sign_negative() {
            return violation("order total must not be negative".to_string());
        }
        if self.total_amount > MAX_ORDER_TOTAL {
            return violation(format!("order total exceeds {MAX_ORDER_TOTAL}"));
        }
        match self.items_total() {
            Some(items_total) if self.total_amount <= items_total => Ok(()),
            Some(items_total) => violation(format!(
                "order total {} exceeds item total {items_total}",
                self.total_amount
            )),
            None => violation("item total is out of range".to_string()),
        }
    }
}

impl Order {
    /// A fresh `Pending` order.
    pub fn place(id: OrderId, new_order: NewOrder) -> Self {
        Self {
            id,
            user_id: new_order.user_id,
            items: new_order.items,
            total_amount: new_order.total_amount,
            status: OrderStatus::Pending,
            predicted_brain_impact: new_order.predicted_brain_impact,
            created_at: Utc::now(),
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self.status, next),
            (OrderStatus::Pending, OrderStatus::Confirmed)
                | (OrderStatus::Confirmed, OrderStatus::Shipped)
                | (OrderStatus::Shipped, OrderStatus::Delivered)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                | (OrderStatus::Confirmed, OrderStatus::Cancelled)
        )
    }

    pub fn transition_to(&mut self, next: OrderStatus) -> Result<(), DomainError> {
        if self.can_transition_to(next) {
            self.status = next;
            return Ok(());
        }

        Err(DomainError::InvalidOrderTransition { from: self.status, to: next })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use crate::domain::product::ProductId;
    use crate::errors::DomainError;

    use super::{NewOrder, Order, OrderId, OrderItem, OrderStatus, MAX_ORDER_TOTAL};

    fn order(status: OrderStatus) -> Order {
        Order {
            id: OrderId("O-1".to_string()),
            user_id: None,
            items: vec![
                OrderItem {
                    product_id: ProductId("1".to_string()),
                    quantity: 2,
                    price: Decimal::new(4_999, 2),
                },
                OrderItem {
                    product_id: ProductId("2".to_string()),
                    quantity: 1,
                    price: Decimal::new(2_999, 2),
                },
            ],
            total_amount: Decimal::new(12_997, 2),
            status,
            predicted_brain_impact: None,
            created_at: Utc::now(),
        }
    }

    fn new_order(total_amount: Decimal) -> NewOrder {
        let order = order(OrderStatus::Pending);
        NewOrder { user_id: None, items: order.items, total_amount, predicted_brain_impact: None }
    }

    fn assert_invalid(order: &NewOrder, fragment: &str) {
        match order.validate() {
            Err(DomainError::InvariantViolation(message)) => {
                assert!(message.contains(fragment), "`{message}` should mention `{fragment}`")
            }
            other => panic!("expected invariant violation, got {other:?}"),
        }
    }

    #[test]
    fn items_total_multiplies_quantities() {
        assert_eq!(new_order(Decimal::ZERO).items_total(), Some(Decimal::new(12_997, 2)));
    }

    #[test]
    fn discounted_totals_validate() {
        new_order(Decimal::new(12_997, 2)).validate().expect("full price");
        new_order(Decimal::new(11_047, 2)).validate().expect("tier discount");
    }

    #[test]
    fn rejects_items_without_quantity_or_with_negative_price() {
        let mut zero_quantity = new_order(Decimal::new(2_999, 2));
        zero_quantity.items[0].quantity = 0;
        assert_invalid(&zero_quantity, "zero quantity");

        let mut negative_price = new_order(Decimal::new(2_999, 2));
        negative_price.items[1].price = Decimal::new(-100, 2);
        assert_invalid(&negative_price, "negative price");

        let mut empty = new_order(Decimal::ZERO);
        empty.items.clear();
        assert_invalid(&empty, "at least one item");
    }

    #[test]
    fn rejects_out_of_range_totals() {
        assert_invalid(&new_order(Decimal::new(-1, 2)), "must not be negative");
        assert_invalid(&new_order(Decimal::MAX), "exceeds");
        assert_invalid(&new_order(MAX_ORDER_TOTAL), "exceeds item total");
        assert_invalid(&new_order(Decimal::new(12_998, 2)), "exceeds item total");
    }

    #[test]
    fn overflowing_item_total_is_rejected() {
        let mut order = new_order(Decimal::ONE);
        order.items[0].price = Decimal::MAX;
        order.items[0].quantity = 2;

        assert_eq!(order.items_total(), None);
        assert_invalid(&order, "out of range");
    }

    #[test]
    fn allows_fulfilment_lifecycle() {
        let mut order = order(OrderStatus::Pending);
        order.transition_to(OrderStatus::Confirmed).expect("pending->confirmed");
        order.transition_to(OrderStatus::Shipped).expect("confirmed->shipped");
        order.transition_to(OrderStatus::Delivered).expect("shipped->delivered");

        assert_eq!(order.status, OrderStatus::Delivered);
    }

    #[test]
    fn shipped_orders_cannot_be_cancelled() {
        let mut order = order(OrderStatus::Shipped);
        let error = order.transition_to(OrderStatus::Cancelled).expect_err("shipped->cancelled");

        assert!(matches!(error, DomainError::InvalidOrderTransition { .. }));
        assert_eq!(order.status, OrderStatus::Shipped);
    }
}
