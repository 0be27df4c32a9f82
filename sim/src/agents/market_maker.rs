//! Market maker agent.
//!
//! Quotes a bid and an ask around the current anchor price every tick,
//! earning the spread when both sides trade. Skips the side that would
//! push its inventory past the configured cap.

use super::{Agent, Fill, MarketView};
use agora_engine::{Order, OwnerId, Price, Quantity, Side};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketMakerConfig {
    /// Half the quoted spread, in ticks.
    pub half_spread_ticks: i64,
    /// Size of each quote.
    pub quote_size: i64,
    /// Absolute inventory bound; the side that would exceed it is withheld.
    pub max_inventory: i64,
}

impl Default for MarketMakerConfig {
    fn default() -> Self {
        Self {
            half_spread_ticks: 2,
            quote_size: 5,
            max_inventory: 60,
        }
    }
}

pub struct MarketMaker {
    owner: OwnerId,
    config: MarketMakerConfig,
    inventory: i64,
}

impl MarketMaker {
    pub fn new(owner: impl Into<String>, config: MarketMakerConfig) -> Self {
        Self {
            owner: OwnerId::new(owner),
            config,
            inventory: 0,
        }
    }

    pub fn inventory(&self) -> i64 {
        self.inventory
    }
}

impl Agent for MarketMaker {
    fn owner(&self) -> &OwnerId {
        &self.owner
    }

    fn agent_type(&self) -> &'static str {
        "MarketMaker"
    }

    fn on_tick(&mut self, view: &MarketView) -> Vec<Order> {
        let anchor = view.anchor();
        let bid = view.ticks_from(anchor, -self.config.half_spread_ticks);
        let ask = view.ticks_from(anchor, self.config.half_spread_ticks);
        let size = Quantity::new(self.config.quote_size);

        let mut orders = Vec::with_capacity(2);
        if bid > Price::ZERO && self.inventory < self.config.max_inventory {
            orders.push(Order::limit(
                self.owner.clone(),
                Side::Buy,
                bid,
                size,
                view.now,
            ));
        }
        if self.inventory > -self.config.max_inventory {
            orders.push(Order::limit(
                self.owner.clone(),
                Side::Sell,
                ask,
                size,
                view.now,
            ));
        }
        orders
    }

    fn on_fill(&mut self, fill: &Fill) {
        self.inventory += fill.signed_qty;
    }
}
