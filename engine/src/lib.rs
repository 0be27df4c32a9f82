//! Agora matching engine.
//!
//! A single-instrument limit order book with price-time priority matching,
//! written as pure functions over immutable book values: every operation
//! consumes a book and returns its successor plus any trades produced, so
//! the caller threads state explicitly and no call retains hidden state.
//!
//! The engine performs no I/O, no logging and no internal synchronisation.
//! Callers serving concurrent submitters must serialise calls against one
//! logical book themselves.

pub mod book;
pub mod error;
pub mod matching;
pub mod order;
pub mod render;
pub mod trade;
pub mod values;

pub use book::OrderBook;
pub use error::EngineError;
pub use matching::match_order;
pub use order::Order;
pub use render::{depth_string, BookSnapshot, RestingOrderView};
pub use trade::Trade;
pub use values::{OrderId, OwnerId, Price, Quantity, Side, Timestamp};
