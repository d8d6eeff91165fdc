//! Depth-limited aggregated views of the book.
//!
//! A [`DepthSnapshot`] is a pure read: `(price, total_quantity)` pairs for
//! the top levels of each side, in priority order. Rendering lives here too
//! so the display path is derived solely from snapshot data and can never
//! touch book state.

use std::fmt;

use crate::types::price::from_fixed_trimmed;

/// One aggregated price level: exact price plus the summed remaining
/// quantity of every order resting at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelView {
    /// Level price in ticks
    pub price: u64,

    /// Sum of remaining quantities at this price
    pub quantity: u64,
}

impl LevelView {
    /// Create a level view
    #[inline]
    pub fn new(price: u64, quantity: u64) -> Self {
        Self { price, quantity }
    }
}

/// Top-of-book view, at most `depth` levels per side.
///
/// `bids` are ordered best-first (descending price), `asks` best-first
/// (ascending price). Sides with fewer distinct levels return fewer entries.
///
/// ## Example
///
/// ```
/// use tickbook::book::OrderBook;
/// use tickbook::types::{Order, Side};
///
/// let mut book = OrderBook::new();
/// book.add_order(Order::new(1, Side::Buy, 10_000_000_000, 10, 0));
/// book.add_order(Order::new(2, Side::Sell, 10_100_000_000, 25, 0));
///
/// let snap = book.snapshot(5);
/// assert_eq!(snap.bids[0].price, 10_000_000_000);
/// assert_eq!(snap.asks[0].quantity, 25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DepthSnapshot {
    /// Bid levels, best (highest price) first
    pub bids: Vec<LevelView>,

    /// Ask levels, best (lowest price) first
    pub asks: Vec<LevelView>,
}

impl DepthSnapshot {
    /// True when neither side has any levels
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

// ============================================================================
// Rendering
// ============================================================================

const COL_WIDTH: usize = 12;

fn write_side_header(f: &mut fmt::Formatter<'_>, label: &str) -> fmt::Result {
    writeln!(f, "--- {} ---", label)?;
    writeln!(f, "{:>w$} | {:>w$}", "Price", "Quantity", w = COL_WIDTH)?;
    writeln!(f, "{}", "-".repeat(COL_WIDTH * 2 + 3))
}

fn write_level(f: &mut fmt::Formatter<'_>, level: &LevelView) -> fmt::Result {
    writeln!(
        f,
        "{:>w$} | {:>w$}",
        from_fixed_trimmed(level.price),
        level.quantity,
        w = COL_WIDTH
    )
}

impl fmt::Display for DepthSnapshot {
    /// Classic ladder layout: asks on top descending into the spread (the
    /// best ask sits just above the best bid), bids below best-first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "========== ORDER BOOK ==========")?;

        write_side_header(f, "ASKS")?;
        for level in self.asks.iter().rev() {
            write_level(f, level)?;
        }

        writeln!(f, "{}", "=".repeat(COL_WIDTH * 2 + 3))?;

        write_side_header(f, "BIDS")?;
        for level in &self.bids {
            write_level(f, level)?;
        }

        writeln!(f, "================================")
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
