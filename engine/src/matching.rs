//! Price-time priority matching.
//!
//! An incoming order is accepted (identifier assigned, rested on its own
//! side) before any execution is attempted, mirroring exchange semantics
//! where acceptance precedes execution. The walk then consumes the opposite
//! side from the best price outward and reconciles the incoming order's own
//! resting record afterwards.

use crate::book::{BookKey, OrderBook};
use crate::error::EngineError;
use crate::order::Order;
use crate::trade::Trade;
use crate::values::{Price, Side};
use chrono::Utc;

/// True when an aggressor at `incoming` crosses a resting order at `resting`.
fn crosses(side: Side, incoming: Price, resting: Price) -> bool {
    match side {
        Side::Buy => incoming >= resting,
        Side::Sell => incoming <= resting,
    }
}

/// Match `order` against `book`, returning the successor book and the trades
/// produced, earliest execution first.
///
/// Execution price is always the resting order's price. Fully filled resting
/// orders leave the book; a partial fill keeps its price-time rank. If the
/// incoming order is left with residual quantity it stays resting on its own
/// side; if fully filled it is removed, never lingering at quantity zero.
///
/// Rejects `order` before deriving any state when its quantity is not
/// positive. The engine has no notion of ownership, so an order can trade
/// against the same owner's resting orders.
pub fn match_order(book: OrderBook, order: Order) -> Result<(OrderBook, Vec<Trade>), EngineError> {
    let (mut book, incoming) = book.insert(order)?;
    let mut remaining = incoming.quantity;
    let mut trades = Vec::new();

    {
        let opposite = book.side_mut(incoming.side.opposite());
        while remaining.is_positive() {
            let Some((key, resting)) = opposite.pop_first() else {
                break;
            };
            if !crosses(incoming.side, incoming.price, resting.price) {
                // Price-ordered side: nothing further out can cross either.
                opposite.insert(key, resting);
                break;
            }

            let fill = remaining.min(resting.quantity);
            let (buy_id, sell_id) = match incoming.side {
                Side::Buy => (incoming.id, resting.id),
                Side::Sell => (resting.id, incoming.id),
            };
            trades.push(Trade::new(buy_id, sell_id, resting.price, fill, Utc::now()));

            remaining = remaining - fill;
            let residual = resting.quantity - fill;
            if residual.is_positive() {
                opposite.insert(key, resting.with_quantity(residual));
            }
        }
    }

    // Reconcile the incoming order's own-side record: residual quantity
    // stays resting, a full fill is removed entirely.
    if remaining < incoming.quantity {
        let key = BookKey::for_order(&incoming);
        let own = book.side_mut(incoming.side);
        own.remove(&key);
        if remaining.is_positive() {
            own.insert(key, incoming.with_quantity(remaining));
        }
    }

    Ok((book, trades))
}
