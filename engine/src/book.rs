use crate::error::EngineError;
use crate::order::Order;
use crate::values::{OrderId, Price, Side, Timestamp};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Ordering key for resting orders.
///
/// Bids sort by price descending, asks by price ascending; ties on price
/// break by submission timestamp ascending, then by identifier (which is
/// assignment order, so colliding timestamps still resolve to insertion
/// order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BookKey {
    price: Decimal,
    is_bid: bool,
    timestamp: Timestamp,
    id: u64,
}

impl BookKey {
    pub(crate) fn for_order(order: &Order) -> Self {
        BookKey {
            price: order.price.inner(),
            is_bid: order.side.is_buy(),
            timestamp: order.timestamp,
            id: order.id.raw(),
        }
    }

    pub(crate) fn price(&self) -> Price {
        Price::from(self.price)
    }
}

impl Ord for BookKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let by_price = if self.is_bid {
            // Bids: higher price first (reverse order)
            other.price.cmp(&self.price)
        } else {
            // Asks: lower price first (natural order)
            self.price.cmp(&other.price)
        };
        by_price
            .then_with(|| self.timestamp.cmp(&other.timestamp))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for BookKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Limit order book for a single instrument.
///
/// The book is an immutable-update value: `insert` consumes the book and
/// returns a successor, so "old" and "new" states never alias. Both sides
/// are ordered maps whose key realises the price-time comparator directly,
/// so no re-sorting is ever needed.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    bids: BTreeMap<BookKey, Order>,
    asks: BTreeMap<BookKey, Order>,
    last_order_id: u64,
}

impl OrderBook {
    /// Create an empty book: no bids, no asks, identifier counter at zero.
    pub fn new() -> Self {
        OrderBook {
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            last_order_id: 0,
        }
    }

    /// Rest an order in the book without attempting to match it.
    ///
    /// Assigns the next identifier (previous last-id + 1) and places the
    /// order on its own side. Returns the new book and the identified order.
    /// Raw insertion can produce a crossed book on purpose; that is how
    /// arbitrage scenarios are constructed.
    pub fn insert(mut self, order: Order) -> Result<(OrderBook, Order), EngineError> {
        if !order.quantity.is_positive() {
            return Err(EngineError::InvalidQuantity(order.quantity.raw()));
        }

        self.last_order_id += 1;
        let order = order.with_id(OrderId::new(self.last_order_id));
        let key = BookKey::for_order(&order);
        self.side_mut(order.side).insert(key, order.clone());

        Ok((self, order))
    }

    /// Price of the best (highest) bid.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.first_key_value().map(|(k, _)| k.price())
    }

    /// Price of the best (lowest) ask.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.first_key_value().map(|(k, _)| k.price())
    }

    /// Midpoint of best bid and best ask; `None` unless both sides quote.
    pub fn mid_price(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::TWO),
            _ => None,
        }
    }

    /// Best ask minus best bid when both sides quote. Negative on a
    /// crossed book.
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// True iff both sides quote and the best bid is at or through the
    /// best ask.
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => bid >= ask,
            _ => false,
        }
    }

    /// Resting bids, best price first.
    pub fn bids(&self) -> impl Iterator<Item = &Order> {
        self.bids.values()
    }

    /// Resting asks, best price first.
    pub fn asks(&self) -> impl Iterator<Item = &Order> {
        self.asks.values()
    }

    /// Number of resting orders across both sides.
    pub fn order_count(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Last identifier assigned by this book. The next accepted order
    /// receives this plus one; callers rely on that to attribute fills.
    pub fn last_order_id(&self) -> u64 {
        self.last_order_id
    }

    pub(crate) fn side_mut(&mut self, side: Side) -> &mut BTreeMap<BookKey, Order> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }
}
