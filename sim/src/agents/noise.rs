//! Noise trader agent.
//!
//! A random trader providing baseline volume: with some probability each
//! tick it submits a randomly sized order on a random side, priced a
//! normally distributed number of ticks away from the anchor.

use super::{Agent, MarketView};
use agora_engine::{Order, OwnerId, Price, Quantity, Side};
use rand::prelude::*;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseTraderConfig {
    /// Probability of trading each tick (0-1).
    pub trade_probability: f64,
    /// Order sizes are drawn uniformly from 1..=max_order_size.
    pub max_order_size: i64,
    /// Standard deviation of the price offset, in ticks.
    pub price_sigma_ticks: f64,
    /// Seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for NoiseTraderConfig {
    fn default() -> Self {
        Self {
            trade_probability: 0.4,
            max_order_size: 10,
            price_sigma_ticks: 4.0,
            seed: None,
        }
    }
}

pub struct NoiseTrader {
    owner: OwnerId,
    config: NoiseTraderConfig,
    offset_dist: Normal<f64>,
    rng: StdRng,
}

impl NoiseTrader {
    /// # Panics
    ///
    /// If `price_sigma_ticks` is negative or not finite. Configs loaded
    /// from files are validated before construction.
    pub fn new(owner: impl Into<String>, config: NoiseTraderConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let offset_dist =
            Normal::new(0.0, config.price_sigma_ticks).expect("price sigma must be finite and >= 0");

        Self {
            owner: OwnerId::new(owner),
            config,
            offset_dist,
            rng,
        }
    }
}

impl Agent for NoiseTrader {
    fn owner(&self) -> &OwnerId {
        &self.owner
    }

    fn agent_type(&self) -> &'static str {
        "NoiseTrader"
    }

    fn on_tick(&mut self, view: &MarketView) -> Vec<Order> {
        if self.rng.gen::<f64>() > self.config.trade_probability {
            return Vec::new();
        }

        let side = if self.rng.gen::<bool>() {
            Side::Buy
        } else {
            Side::Sell
        };
        let offset = self.offset_dist.sample(&mut self.rng).round() as i64;
        let price = view.ticks_from(view.anchor(), offset);
        if price <= Price::ZERO {
            return Vec::new();
        }

        let quantity = Quantity::new(self.rng.gen_range(1..=self.config.max_order_size.max(1)));
        vec![Order::limit(
            self.owner.clone(),
            side,
            price,
            quantity,
            view.now,
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::testing::quoted_view;

    #[test]
    fn always_trades_at_probability_one() {
        let config = NoiseTraderConfig {
            trade_probability: 1.0,
            seed: Some(42),
            ..Default::default()
        };
        let mut trader = NoiseTrader::new("noise-1", config);

        for _ in 0..20 {
            let orders = trader.on_tick(&quoted_view());
            assert_eq!(orders.len(), 1);
            assert!(orders[0].quantity.is_positive());
            assert!(orders[0].price > Price::ZERO);
        }
    }

    #[test]
    fn never_trades_at_probability_zero() {
        let config = NoiseTraderConfig {
            trade_probability: 0.0,
            seed: Some(42),
            ..Default::default()
        };
        let mut trader = NoiseTrader::new("noise-1", config);

        for _ in 0..20 {
            assert!(trader.on_tick(&quoted_view()).is_empty());
        }
    }

    #[test]
    fn seeded_traders_are_deterministic() {
        let config = NoiseTraderConfig {
            trade_probability: 1.0,
            seed: Some(7),
            ..Default::default()
        };
        let mut a = NoiseTrader::new("noise-1", config.clone());
        let mut b = NoiseTrader::new("noise-1", config);

        let view = quoted_view();
        for _ in 0..50 {
            let lhs = a.on_tick(&view);
            let rhs = b.on_tick(&view);
            assert_eq!(lhs, rhs);
        }
    }
}
