//! tickbook - Demo Entry Point
//!
//! Drives the book through the core call sequence (add, snapshot, amend,
//! cancel) and prints rendered depth views. All state lives in the book
//! instance below; the binary only constructs orders and formats output.

use std::time::{SystemTime, UNIX_EPOCH};

use tickbook::types::price::to_fixed;
use tickbook::{Order, OrderBook, Side};

fn timestamp_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn px(s: &str) -> u64 {
    to_fixed(s).expect("demo prices are valid literals")
}

fn main() {
    println!("===========================================");
    println!("  tickbook - limit order book demo");
    println!("===========================================");
    println!();

    let mut book = OrderBook::with_capacity(1_000);

    // Seed both sides around 100.0
    let seed = [
        (1u64, Side::Buy, "100.0", 10u64),
        (2, Side::Buy, "100.0", 20),
        (3, Side::Buy, "99.5", 15),
        (4, Side::Sell, "101.0", 25),
        (5, Side::Sell, "101.5", 30),
    ];

    for (id, side, price, quantity) in seed {
        book.add_order(Order::new(id, side, px(price), quantity, timestamp_ns()));
    }

    println!("Seeded {} orders:", book.order_count());
    println!("{}", book.render(5));

    // Same-price quantity amend keeps queue position
    book.amend_order(1, px("100.0"), 50);
    println!("After amending order 1 to quantity 50 (same price):");
    println!("{}", book.render(5));

    // Price amend re-queues at the new level
    book.amend_order(1, px("99.0"), 50);
    println!("After amending order 1 to price 99.0 (priority forfeited):");
    println!("{}", book.render(5));

    book.cancel_order(2);
    println!("After cancelling order 2:");
    println!("{}", book.render(5));

    println!("Resting orders: {}", book.order_count());
    println!(
        "Best bid: {:?}  Best ask: {:?}  Spread: {:?}",
        book.best_bid(),
        book.best_ask(),
        book.spread()
    );
}
