//! Arbitrageur agent.
//!
//! Watches for a crossed book (best bid at or through the best ask) and
//! captures it by lifting the cheap asks and hitting the rich bids in the
//! same turn, locking in the edge with a flat net position.

use super::{Agent, MarketView};
use agora_engine::{Order, OwnerId, Quantity, Side};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbitrageurConfig {
    /// Size submitted on each leg.
    pub order_size: i64,
    /// Minimum bid-over-ask edge, in ticks, before acting.
    pub min_edge_ticks: i64,
}

impl Default for ArbitrageurConfig {
    fn default() -> Self {
        Self {
            order_size: 5,
            min_edge_ticks: 1,
        }
    }
}

pub struct Arbitrageur {
    owner: OwnerId,
    config: ArbitrageurConfig,
}

impl Arbitrageur {
    pub fn new(owner: impl Into<String>, config: ArbitrageurConfig) -> Self {
        Self {
            owner: OwnerId::new(owner),
            config,
        }
    }
}

impl Agent for Arbitrageur {
    fn owner(&self) -> &OwnerId {
        &self.owner
    }

    fn agent_type(&self) -> &'static str {
        "Arbitrageur"
    }

    fn on_tick(&mut self, view: &MarketView) -> Vec<Order> {
        if !view.is_crossed {
            return Vec::new();
        }
        let (Some(bid), Some(ask)) = (view.best_bid, view.best_ask) else {
            return Vec::new();
        };

        let min_edge = view.ticks_from(agora_engine::Price::ZERO, self.config.min_edge_ticks);
        if bid - ask < min_edge {
            return Vec::new();
        }

        let size = Quantity::new(self.config.order_size);
        vec![
            // Lift everything offered at or below the stale ask...
            Order::limit(self.owner.clone(), Side::Buy, ask, size, view.now),
            // ...and hit the bids standing at or above the stale bid.
            Order::limit(self.owner.clone(), Side::Sell, bid, size, view.now),
        ]
    }
}
