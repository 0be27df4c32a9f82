//! Simulation runner.
//!
//! The tick-driven loop that sequences agent turns, submits their orders to
//! the matching engine and settles the resulting trades into per-agent
//! accounts. The runner owns the current book value and threads every
//! successor returned by the engine into the next call.

use crate::account::Account;
use crate::agents::{Agent, Fill, MarketView};
use agora_engine::{
    match_order, EngineError, Order, OrderBook, OrderId, OwnerId, Price, Quantity, Side, Timestamp,
};
use chrono::{Duration, TimeZone, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Simulation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of ticks to run.
    pub ticks: u64,
    /// Simulated time between ticks.
    pub tick_interval_ms: u64,
    /// Anchor price before the book has quotes or trades.
    pub reference_price: Price,
    /// Price grid agents quote on.
    pub tick_size: Price,
    /// Log a summary line every tick instead of every 100 ticks.
    pub verbose: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks: 1000,
            tick_interval_ms: 100,
            reference_price: Price::from(Decimal::new(10_000, 2)),
            tick_size: Price::from(Decimal::new(25, 2)),
            verbose: false,
        }
    }
}

/// Counters accumulated over a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationMetrics {
    pub total_ticks: u64,
    pub total_orders: u64,
    pub rejected_orders: u64,
    pub total_trades: u64,
    pub total_volume: i64,
    /// Mid price at the end of the run, when both sides quote.
    pub final_mid: Option<Price>,
    /// Relative standard deviation of the anchor price over the run.
    pub price_volatility: f64,
}

/// Outcome of a single tick.
#[derive(Debug, Clone)]
pub struct TickResult {
    pub tick: u64,
    pub orders_submitted: usize,
    pub trades_executed: usize,
    pub volume: i64,
}

pub(crate) struct AgentSlot {
    pub(crate) agent: Box<dyn Agent>,
    pub(crate) account: Account,
    pub(crate) orders: u64,
    pub(crate) fills: u64,
}

/// Owner of the book value and coordinator of agent turns.
pub struct SimulationRunner {
    config: SimulationConfig,
    book: OrderBook,
    agents: Vec<AgentSlot>,
    /// Assigned order id -> submitting agent index. Seed orders are absent.
    owners_by_order: HashMap<u64, usize>,
    trades: Vec<agora_engine::Trade>,
    last_trade_price: Option<Price>,
    anchor_history: Vec<Decimal>,
    metrics: SimulationMetrics,
    tick: u64,
    clock: Timestamp,
}

impl SimulationRunner {
    pub fn new(config: SimulationConfig) -> Self {
        // Fixed epoch so seeded runs are reproducible end to end.
        let clock = Utc
            .timestamp_opt(1_600_000_000, 0)
            .single()
            .expect("valid epoch");

        Self {
            config,
            book: OrderBook::new(),
            agents: Vec::new(),
            owners_by_order: HashMap::new(),
            trades: Vec::new(),
            last_trade_price: None,
            anchor_history: Vec::new(),
            metrics: SimulationMetrics::default(),
            tick: 0,
            clock,
        }
    }

    pub fn add_agent(&mut self, agent: Box<dyn Agent>) {
        self.agents.push(AgentSlot {
            agent,
            account: Account::new(),
            orders: 0,
            fills: 0,
        });
    }

    /// Rest orders in the book without matching, e.g. to start a run with
    /// liquidity or to stage a crossed book for the arbitrageur.
    ///
    /// All quantities are validated up front: a rejected entry leaves the
    /// runner's book exactly as it was, with nothing partially seeded.
    pub fn seed_book(
        &mut self,
        orders: impl IntoIterator<Item = (Side, Price, Quantity)>,
    ) -> Result<(), EngineError> {
        let orders: Vec<_> = orders.into_iter().collect();
        if let Some(&(_, _, quantity)) = orders.iter().find(|(_, _, q)| !q.is_positive()) {
            return Err(EngineError::InvalidQuantity(quantity.raw()));
        }

        let seed_owner = OwnerId::new("seed");
        for (side, price, quantity) in orders {
            let order = Order::limit(seed_owner.clone(), side, price, quantity, self.clock);
            let book = std::mem::take(&mut self.book);
            let (book, _) = book
                .insert(order)
                .expect("quantity validated before seeding");
            self.book = book;
        }
        Ok(())
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn trades(&self) -> &[agora_engine::Trade] {
        &self.trades
    }

    pub fn metrics(&self) -> &SimulationMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub(crate) fn slots(&self) -> &[AgentSlot] {
        &self.agents
    }

    /// Price used to mark open inventory: last trade, else mid, else the
    /// configured reference.
    pub fn mark_price(&self) -> Price {
        self.last_trade_price
            .or_else(|| self.book.mid_price())
            .unwrap_or(self.config.reference_price)
    }

    fn market_view(&self) -> MarketView {
        MarketView {
            tick: self.tick,
            now: self.clock,
            best_bid: self.book.best_bid(),
            best_ask: self.book.best_ask(),
            mid_price: self.book.mid_price(),
            spread: self.book.spread(),
            is_crossed: self.book.is_crossed(),
            last_trade_price: self.last_trade_price,
            reference_price: self.config.reference_price,
            tick_size: self.config.tick_size,
        }
    }

    /// Run a single tick: each agent in turn observes the current book and
    /// has its orders matched before the next agent acts.
    pub fn tick(&mut self) -> TickResult {
        let mut orders_submitted = 0;
        let mut trades_executed = 0;
        let mut volume = 0i64;

        for idx in 0..self.agents.len() {
            let view = self.market_view();
            let orders = self.agents[idx].agent.on_tick(&view);

            for order in orders {
                if !order.quantity.is_positive() {
                    self.metrics.rejected_orders += 1;
                    tracing::warn!(
                        agent = %self.agents[idx].agent.owner(),
                        quantity = order.quantity.raw(),
                        "dropping order with non-positive quantity"
                    );
                    continue;
                }

                orders_submitted += 1;
                let (executed, traded) = self.submit(idx, order);
                trades_executed += executed;
                volume += traded;
            }
        }

        self.anchor_history.push(self.market_view().anchor().inner());

        self.metrics.total_ticks += 1;
        self.tick += 1;
        self.clock = self.clock + Duration::milliseconds(self.config.tick_interval_ms as i64);

        let result = TickResult {
            tick: self.tick - 1,
            orders_submitted,
            trades_executed,
            volume,
        };

        if self.config.verbose || self.tick % 100 == 0 {
            tracing::debug!(
                tick = result.tick,
                orders = result.orders_submitted,
                trades = result.trades_executed,
                volume = result.volume,
                best_bid = ?self.book.best_bid(),
                best_ask = ?self.book.best_ask(),
                "tick complete"
            );
        }

        result
    }

    /// Run the configured number of ticks and return the final metrics.
    pub fn run(&mut self) -> SimulationMetrics {
        for _ in 0..self.config.ticks {
            self.tick();
        }
        self.finalize_metrics();
        self.metrics.clone()
    }

    fn submit(&mut self, idx: usize, order: Order) -> (usize, i64) {
        // The book assigns previous-last-id + 1, so the owner of the next
        // identifier is known before the engine is called.
        let next_id = self.book.last_order_id() + 1;
        self.owners_by_order.insert(next_id, idx);

        let book = std::mem::take(&mut self.book);
        // Quantity was validated by the caller; the engine has no other
        // rejection path.
        let (book, trades) =
            match_order(book, order).expect("quantity validated before submission");
        self.book = book;

        self.agents[idx].orders += 1;
        self.metrics.total_orders += 1;

        let executed = trades.len();
        let mut volume = 0i64;
        for trade in &trades {
            volume += trade.quantity.raw();
            self.settle(trade);
        }
        self.trades.extend(trades);

        (executed, volume)
    }

    fn settle(&mut self, trade: &agora_engine::Trade) {
        self.metrics.total_trades += 1;
        self.metrics.total_volume += trade.quantity.raw();
        self.last_trade_price = Some(trade.price);

        self.settle_side(trade.buy_order_id, trade.quantity.raw(), trade);
        self.settle_side(trade.sell_order_id, -trade.quantity.raw(), trade);
    }

    fn settle_side(&mut self, order_id: OrderId, signed_qty: i64, trade: &agora_engine::Trade) {
        // Seed orders have no owning agent; their fills vanish into the void.
        let Some(&idx) = self.owners_by_order.get(&order_id.raw()) else {
            return;
        };
        let slot = &mut self.agents[idx];
        slot.account.apply_fill(signed_qty, trade.price);
        slot.fills += 1;
        slot.agent.on_fill(&Fill {
            order_id,
            signed_qty,
            price: trade.price,
            timestamp: trade.timestamp,
        });
    }

    fn finalize_metrics(&mut self) {
        self.metrics.final_mid = self.book.mid_price();

        if self.anchor_history.len() > 1 {
            let n = Decimal::from(self.anchor_history.len());
            let mean = self.anchor_history.iter().copied().sum::<Decimal>() / n;
            if !mean.is_zero() {
                let variance: f64 = self
                    .anchor_history
                    .iter()
                    .map(|p| {
                        let d = ((*p - mean) / mean).to_f64().unwrap_or(0.0);
                        d * d
                    })
                    .sum::<f64>()
                    / self.anchor_history.len() as f64;
                self.metrics.price_volatility = variance.sqrt();
            }
        }
    }
}
