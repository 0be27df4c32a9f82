use thiserror::Error;

/// Errors the engine can reject a submission with.
///
/// Empty-book queries are not errors: `best_bid`, `best_ask`, `mid_price`
/// and `spread` return `None` instead. Rejection happens during validation,
/// before any successor state is derived. `insert` and `match_order` consume
/// the book by value and do not return it on the error path, so a caller
/// that must keep its book across a possible rejection validates the order
/// up front (as the simulation runner does) or clones before calling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// An order was submitted with quantity <= 0.
    #[error("order quantity must be positive, got {0}")]
    InvalidQuantity(i64),
}
