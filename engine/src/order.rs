use crate::values::{OrderId, OwnerId, Price, Quantity, Side, Timestamp};
use serde::{Deserialize, Serialize};

/// A resting or incoming limit order.
///
/// Orders are immutable values: a partial fill is represented by a new
/// `Order` carrying the same identifier and a reduced quantity, never by
/// in-place mutation of a book entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Book-assigned identifier; `OrderId::UNASSIGNED` until accepted.
    pub id: OrderId,
    /// Opaque key of whoever submitted the order.
    pub owner: OwnerId,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
    /// Submission time, used only for time-priority tie-breaking.
    pub timestamp: Timestamp,
}

impl Order {
    /// Create a limit order awaiting identifier assignment by the book.
    pub fn limit(
        owner: OwnerId,
        side: Side,
        price: Price,
        quantity: Quantity,
        timestamp: Timestamp,
    ) -> Self {
        Order {
            id: OrderId::UNASSIGNED,
            owner,
            side,
            price,
            quantity,
            timestamp,
        }
    }

    pub(crate) fn with_id(mut self, id: OrderId) -> Self {
        self.id = id;
        self
    }

    /// Same order with a different quantity. Price, timestamp and identifier
    /// are unchanged, so the order's price-time rank is unchanged.
    pub fn with_quantity(&self, quantity: Quantity) -> Self {
        Order {
            quantity,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn limit_order_starts_unassigned() {
        let order = Order::limit(
            OwnerId::new("mm-1"),
            Side::Buy,
            Price::from(dec!(100.0)),
            Quantity::new(10),
            Utc::now(),
        );
        assert_eq!(order.id, OrderId::UNASSIGNED);
        assert_eq!(order.quantity, Quantity::new(10));
    }

    #[test]
    fn with_quantity_preserves_identity() {
        let order = Order::limit(
            OwnerId::new("mm-1"),
            Side::Sell,
            Price::from(dec!(101.5)),
            Quantity::new(10),
            Utc::now(),
        )
        .with_id(OrderId::new(7));

        let reduced = order.with_quantity(Quantity::new(3));
        assert_eq!(reduced.id, order.id);
        assert_eq!(reduced.price, order.price);
        assert_eq!(reduced.timestamp, order.timestamp);
        assert_eq!(reduced.quantity, Quantity::new(3));
    }
}
