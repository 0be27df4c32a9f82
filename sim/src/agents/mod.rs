//! Trading agents.
//!
//! Agents observe a read-only market view each tick and answer with the
//! orders they want submitted. The simulation loop owns the book, performs
//! the actual submissions and notifies agents of their fills.

mod arbitrageur;
mod market_maker;
mod noise;

pub use arbitrageur::{Arbitrageur, ArbitrageurConfig};
pub use market_maker::{MarketMaker, MarketMakerConfig};
pub use noise::{NoiseTrader, NoiseTraderConfig};

use agora_engine::{Order, OrderId, OwnerId, Price, Timestamp};

/// Read-only snapshot of market state handed to agents each turn.
#[derive(Debug, Clone)]
pub struct MarketView {
    pub tick: u64,
    pub now: Timestamp,
    pub best_bid: Option<Price>,
    pub best_ask: Option<Price>,
    pub mid_price: Option<Price>,
    pub spread: Option<Price>,
    pub is_crossed: bool,
    /// Price of the most recent trade in the simulation, if any.
    pub last_trade_price: Option<Price>,
    /// Configured reference price, the fallback anchor before any quotes.
    pub reference_price: Price,
    /// Price grid agents quote on.
    pub tick_size: Price,
}

impl MarketView {
    pub fn has_quotes(&self) -> bool {
        self.best_bid.is_some() && self.best_ask.is_some()
    }

    /// Price agents anchor their quoting on: mid when both sides quote,
    /// else the last trade, else the configured reference.
    pub fn anchor(&self) -> Price {
        self.mid_price
            .or(self.last_trade_price)
            .unwrap_or(self.reference_price)
    }

    /// Offset from a price by a signed number of ticks.
    pub fn ticks_from(&self, base: Price, ticks: i64) -> Price {
        base + self.tick_size * rust_decimal::Decimal::from(ticks)
    }
}

/// Notification that one of an agent's orders traded.
#[derive(Debug, Clone)]
pub struct Fill {
    pub order_id: OrderId,
    /// Positive when the agent bought, negative when it sold.
    pub signed_qty: i64,
    pub price: Price,
    pub timestamp: Timestamp,
}

/// A profit-seeking participant in the simulation.
pub trait Agent {
    /// Owner key stamped on every order this agent submits.
    fn owner(&self) -> &OwnerId;

    /// Type name for logging and reporting.
    fn agent_type(&self) -> &'static str;

    /// Called once per tick; returns the orders to submit this turn.
    fn on_tick(&mut self, view: &MarketView) -> Vec<Order>;

    /// Called when one of this agent's orders trades.
    fn on_fill(&mut self, _fill: &Fill) {}
}


#[cfg(test)]
mod tests {
    use super::testing::{empty_view, quoted_view};
    use agora_engine::Price;
    use rust_decimal_macros::dec;

    #[test]
    fn anchor_prefers_mid_then_last_trade_then_reference() {
        let mut view = quoted_view();
        assert_eq!(view.anchor(), Price::from(dec!(100.0)));

        view.mid_price = None;
        view.last_trade_price = Some(Price::from(dec!(101.0)));
        assert_eq!(view.anchor(), Price::from(dec!(101.0)));

        let view = empty_view();
        assert_eq!(view.anchor(), Price::from(dec!(100.0)));
    }

    #[test]
    fn ticks_from_moves_on_the_grid() {
        let view = quoted_view();
        let base = Price::from(dec!(100.0));
        assert_eq!(view.ticks_from(base, 2), Price::from(dec!(100.50)));
        assert_eq!(view.ticks_from(base, -3), Price::from(dec!(99.25)));
    }
}
