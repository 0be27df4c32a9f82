//! Per-agent position and cash accounting.
//!
//! The engine knows nothing about owners; the simulation loop maintains one
//! `Account` per agent from the trades the engine returns.

use agora_engine::Price;
use rust_decimal::Decimal;
use serde::Serialize;

/// Signed inventory plus cash balance for one agent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Account {
    /// Units held; positive = long, negative = short.
    pub inventory: i64,
    /// Quote currency balance; starts at zero, buying spends cash.
    pub cash: Decimal,
}

impl Account {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a fill: `signed_qty` is positive for a buy, negative for a sell.
    pub fn apply_fill(&mut self, signed_qty: i64, price: Price) {
        self.inventory += signed_qty;
        self.cash -= Decimal::from(signed_qty) * price.inner();
    }

    /// Cash plus inventory marked at `mark`.
    pub fn mark_to_market(&self, mark: Price) -> Decimal {
        self.cash + Decimal::from(self.inventory) * mark.inner()
    }
}
