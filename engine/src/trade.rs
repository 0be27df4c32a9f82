use crate::values::{OrderId, Price, Quantity, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An executed trade. Produced exclusively by the matching engine and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    /// Execution price: always the resting order's price.
    pub price: Price,
    pub quantity: Quantity,
    /// Execution time, freshly taken when the trade occurs.
    pub timestamp: Timestamp,
}

impl Trade {
    pub fn new(
        buy_order_id: OrderId,
        sell_order_id: OrderId,
        price: Price,
        quantity: Quantity,
        timestamp: Timestamp,
    ) -> Self {
        Trade {
            buy_order_id,
            sell_order_id,
            price,
            quantity,
            timestamp,
        }
    }

    /// Notional value (price * quantity).
    pub fn notional(&self) -> Decimal {
        self.price.inner() * Decimal::from(self.quantity.raw())
    }
}
