//! # tickbook
//!
//! In-memory limit order book for a single instrument.
//!
//! ## Architecture
//!
//! - **Types**: Order, Side, fixed-point prices, depth views
//! - **Book**: slab-backed arena, per-side price ladders, identity index
//!
//! ## Design Principles
//!
//! 1. **Price-time priority**: levels ordered by price, FIFO within a level;
//!    a price amend forfeits queue position, a quantity amend keeps it
//! 2. **No floating point**: prices are integer ticks (10^8 scaling),
//!    decimal conversion happens only at the boundary
//! 3. **Pre-allocated memory**: slab arena, no per-order heap calls
//! 4. **Synchronous execution**: every call runs to completion; no locks,
//!    no hidden background work
//!
//! ## Example
//!
//! ```
//! use tickbook::{Order, OrderBook, Side};
//!
//! let mut book = OrderBook::with_capacity(1_000);
//!
//! book.add_order(Order::new(1, Side::Buy, 10_000_000_000, 10, 0));
//! book.add_order(Order::new(2, Side::Buy, 10_000_000_000, 20, 1));
//! book.add_order(Order::new(3, Side::Sell, 10_100_000_000, 25, 2));
//!
//! let snap = book.snapshot(2);
//! assert_eq!(snap.bids[0].quantity, 30);
//!
//! assert!(book.cancel_order(2));
//! assert_eq!(book.snapshot(1).bids[0].quantity, 10);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Side, price conversions, depth views
pub mod types;

/// Order book: arena, price ladders, façade
pub mod book;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use book::{Ladder, OrderBook, OrderNode, PriceLevel};
pub use types::{DepthSnapshot, LevelView, Order, Side};
