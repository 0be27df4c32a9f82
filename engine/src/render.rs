//! Read-only presentation views of book state.

use crate::book::OrderBook;
use crate::order::Order;
use crate::values::{Price, Timestamp};
use serde::Serialize;

/// Human-readable depth view: "Bids: [...], Asks: [...]" with each entry
/// as `price x quantity`, best price first.
pub fn depth_string(book: &OrderBook) -> String {
    let fmt_side = |orders: Vec<&Order>| -> String {
        orders
            .iter()
            .map(|o| format!("{} x {}", o.price, o.quantity))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Bids: [{}], Asks: [{}]",
        fmt_side(book.bids().collect()),
        fmt_side(book.asks().collect())
    )
}

/// One resting order as exposed in a snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct RestingOrderView {
    pub id: u64,
    pub owner: String,
    pub price: Price,
    pub quantity: i64,
    pub timestamp: Timestamp,
}

impl From<&Order> for RestingOrderView {
    fn from(order: &Order) -> Self {
        RestingOrderView {
            id: order.id.raw(),
            owner: order.owner.to_string(),
            price: order.price,
            quantity: order.quantity.raw(),
            timestamp: order.timestamp,
        }
    }
}

/// Structured snapshot of the book, suitable for JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct BookSnapshot {
    pub bids: Vec<RestingOrderView>,
    pub asks: Vec<RestingOrderView>,
    pub last_order_id: u64,
}

impl BookSnapshot {
    pub fn capture(book: &OrderBook) -> Self {
        BookSnapshot {
            bids: book.bids().map(RestingOrderView::from).collect(),
            asks: book.asks().map(RestingOrderView::from).collect(),
            last_order_id: book.last_order_id(),
        }
    }
}
