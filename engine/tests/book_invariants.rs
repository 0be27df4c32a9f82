//! Randomised invariant checks over long operation sequences.
//!
//! A seeded stream of orders is pushed through `match_order` and after each
//! call the resulting book must be price-time sorted on both sides, hold no
//! zero-quantity orders, never be crossed, and conserve quantity.

use agora_engine::{match_order, Order, OrderBook, OwnerId, Price, Quantity, Side};
use chrono::{Duration, TimeZone, Utc};
use rand::prelude::*;
use rust_decimal::Decimal;

fn assert_sorted(book: &OrderBook) {
    let bids: Vec<&Order> = book.bids().collect();
    for pair in bids.windows(2) {
        assert!(
            pair[0].price > pair[1].price
                || (pair[0].price == pair[1].price && pair[0].timestamp <= pair[1].timestamp),
            "bid side out of order: {} then {}",
            pair[0].price,
            pair[1].price
        );
    }

    let asks: Vec<&Order> = book.asks().collect();
    for pair in asks.windows(2) {
        assert!(
            pair[0].price < pair[1].price
                || (pair[0].price == pair[1].price && pair[0].timestamp <= pair[1].timestamp),
            "ask side out of order: {} then {}",
            pair[0].price,
            pair[1].price
        );
    }
}

fn assert_no_ghosts(book: &OrderBook) {
    assert!(book.bids().all(|o| o.quantity.raw() > 0));
    assert!(book.asks().all(|o| o.quantity.raw() > 0));
}

fn total_resting(book: &OrderBook) -> i64 {
    book.bids().map(|o| o.quantity.raw()).sum::<i64>()
        + book.asks().map(|o| o.quantity.raw()).sum::<i64>()
}

#[test]
fn random_order_stream_preserves_invariants() {
    let mut rng = StdRng::seed_from_u64(20240817);
    let base = Utc.timestamp_opt(1_700_000_000, 0).single().expect("valid epoch");

    let mut book = OrderBook::new();
    let mut step = 0i64;

    for _ in 0..2_000 {
        step += 1;
        let side = if rng.gen::<bool>() { Side::Buy } else { Side::Sell };
        // Prices on a coarse grid around 100 so levels collide often.
        let ticks: i64 = rng.gen_range(-20..=20);
        let price = Price::from(Decimal::new(10_000 + ticks * 25, 2));
        let qty = Quantity::new(rng.gen_range(1..=50));
        let order = Order::limit(
            OwnerId::new("fuzz"),
            side,
            price,
            qty,
            base + Duration::milliseconds(step),
        );

        let before = total_resting(&book);
        let incoming = qty.raw();

        let (next, trades) = match_order(book, order).expect("positive quantity");
        book = next;

        assert_sorted(&book);
        assert_no_ghosts(&book);
        assert!(!book.is_crossed(), "book crossed after match at step {step}");

        // Each trade removes its quantity from the opposite side and from
        // the incoming order; only the incoming residual is net-new.
        let traded: i64 = trades.iter().map(|t| t.quantity.raw()).sum();
        assert_eq!(total_resting(&book), before + incoming - 2 * traded);
    }

    assert!(book.last_order_id() == 2_000);
}

#[test]
fn identifier_counter_never_gaps() {
    let mut rng = StdRng::seed_from_u64(7);
    let base = Utc.timestamp_opt(1_700_000_000, 0).single().expect("valid epoch");

    let mut book = OrderBook::new();
    for i in 0..200u64 {
        assert_eq!(book.last_order_id(), i);
        let side = if rng.gen::<bool>() { Side::Buy } else { Side::Sell };
        let order = Order::limit(
            OwnerId::new("fuzz"),
            side,
            Price::from(Decimal::new(10_000, 2)),
            Quantity::new(rng.gen_range(1..=10)),
            base + Duration::milliseconds(i as i64),
        );
        let (next, _) = match_order(book, order).expect("positive quantity");
        book = next;
        assert_eq!(book.last_order_id(), i + 1);
    }
}
