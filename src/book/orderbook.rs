//! Order book façade.
//!
//! ## Architecture
//!
//! The book coordinates three structures:
//!
//! - **Slab**: arena ownership of every resting order node, O(1)
//!   allocate/release (https://docs.rs/slab/0.4.11)
//! - **Ladder** per side: price-ordered levels with FIFO queues
//! - **HashMap**: order ID to slab key, O(1) cancel/amend lookup
//!
//! A node's key is referenced from both the identity index and its level's
//! queue; the slab alone owns the node. Every mutating call touches exactly
//! one level and runs to completion, so callers observe atomic transitions.
//!
//! ## Threading
//!
//! Not internally synchronized. One book per thread, or external mutual
//! exclusion per instance.
//!
//! ## Example
//!
//! ```
//! use tickbook::book::OrderBook;
//! use tickbook::types::{Order, Side};
//!
//! let mut book = OrderBook::with_capacity(10_000);
//!
//! book.add_order(Order::new(1, Side::Buy, 10_000_000_000, 10, 0));
//! book.add_order(Order::new(2, Side::Sell, 10_100_000_000, 25, 0));
//!
//! assert_eq!(book.order_count(), 2);
//! assert_eq!(book.best_bid(), Some(10_000_000_000));
//! assert_eq!(book.best_ask(), Some(10_100_000_000));
//! ```

use std::collections::HashMap;

use slab::Slab;

use crate::book::{Ladder, OrderNode};
use crate::types::{DepthSnapshot, Order, Side};

/// Single-instrument limit order book with price-time priority.
///
/// An order ID is either ABSENT or RESTING. [`add_order`] moves
/// ABSENT→RESTING, [`cancel_order`] moves RESTING→ABSENT, and
/// [`amend_order`] is a RESTING→RESTING transition. Calls against the
/// wrong state are no-ops reported through the return value, never errors.
///
/// Allocation exhaustion is the one unrecoverable condition: the arena
/// grows through the global allocator and an out-of-memory condition
/// aborts rather than leaving a partially-mutated book.
///
/// [`add_order`]: OrderBook::add_order
/// [`cancel_order`]: OrderBook::cancel_order
/// [`amend_order`]: OrderBook::amend_order
#[derive(Debug)]
pub struct OrderBook {
    /// Arena ownership of every resting order node
    orders: Slab<OrderNode>,

    /// Bid levels (best = highest price)
    bids: Ladder,

    /// Ask levels (best = lowest price)
    asks: Ladder,

    /// Order ID to slab key mapping (for O(1) cancel/amend)
    index: HashMap<u64, usize>,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Create a new empty book
    pub fn new() -> Self {
        Self {
            orders: Slab::new(),
            bids: Ladder::new(Side::Buy),
            asks: Ladder::new(Side::Sell),
            index: HashMap::new(),
        }
    }

    /// Create a book with pre-allocated capacity
    ///
    /// Pre-sizes the arena and the identity index so steady-state
    /// operation does not reallocate.
    ///
    /// # Example
    ///
    /// ```
    /// use tickbook::book::OrderBook;
    ///
    /// let book = OrderBook::with_capacity(100_000);
    /// assert!(book.capacity() >= 100_000);
    /// ```
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            bids: Ladder::new(Side::Buy),
            asks: Ladder::new(Side::Sell),
            index: HashMap::with_capacity(order_capacity),
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Current arena capacity (pre-allocated slots)
    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Number of resting orders; O(1)
    #[inline]
    pub fn order_count(&self) -> usize {
        self.index.len()
    }

    /// Check if the book has no resting orders
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Check if an order is resting
    #[inline]
    pub fn contains_order(&self, order_id: u64) -> bool {
        self.index.contains_key(&order_id)
    }

    /// Number of resting bid orders
    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bids.order_count()
    }

    /// Number of resting ask orders
    #[inline]
    pub fn ask_count(&self) -> usize {
        self.asks.order_count()
    }

    /// Number of distinct bid price levels
    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.level_count()
    }

    /// Number of distinct ask price levels
    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.level_count()
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Add an order to the book.
    ///
    /// The order rests at the back of its price level's queue. A duplicate
    /// ID (already RESTING) leaves the book untouched; the `false` return
    /// is the only signal, duplicates are not an error condition.
    ///
    /// # Returns
    ///
    /// `true` if the order was added, `false` on a duplicate ID.
    ///
    /// # Example
    ///
    /// ```
    /// use tickbook::book::OrderBook;
    /// use tickbook::types::{Order, Side};
    ///
    /// let mut book = OrderBook::new();
    /// assert!(book.add_order(Order::new(7, Side::Buy, 10_000_000_000, 10, 0)));
    /// assert!(!book.add_order(Order::new(7, Side::Sell, 9_000_000_000, 99, 1)));
    /// assert_eq!(book.order_count(), 1);
    /// ```
    pub fn add_order(&mut self, order: Order) -> bool {
        if self.index.contains_key(&order.id) {
            return false;
        }

        let order_id = order.id;
        let side = order.side;

        let key = self.orders.insert(OrderNode::new(order));
        match side {
            Side::Buy => self.bids.route_in(key, &mut self.orders),
            Side::Sell => self.asks.route_in(key, &mut self.orders),
        }
        self.index.insert(order_id, key);

        true
    }

    /// Cancel a resting order by ID.
    ///
    /// Unlinks the order from its price level (erasing the level if it
    /// empties), drops the identity entry, and releases the arena slot.
    ///
    /// # Returns
    ///
    /// `true` if the order was resting, `false` if the ID was absent.
    pub fn cancel_order(&mut self, order_id: u64) -> bool {
        let Some(key) = self.index.remove(&order_id) else {
            return false;
        };

        let side = self.orders.get(key).expect("indexed key must be live").order.side;
        match side {
            Side::Buy => self.bids.route_out(key, &mut self.orders),
            Side::Sell => self.asks.route_out(key, &mut self.orders),
        }

        self.orders.remove(key);
        true
    }

    /// Amend a resting order's price and/or quantity.
    ///
    /// - **Price change**: cancel-and-replace at the new price. The order
    ///   moves to the back of the destination level's queue; time priority
    ///   at the old price is forfeited. Any price change is a new order
    ///   for priority purposes.
    /// - **Quantity-only change**: updated in place, queue position
    ///   untouched, so time priority is preserved. Increases and decreases
    ///   are both allowed; no minimum quantity is enforced.
    /// - **No change**: no-op.
    ///
    /// # Returns
    ///
    /// `true` whenever the ID was resting (including the no-op case),
    /// `false` if it was absent.
    pub fn amend_order(&mut self, order_id: u64, new_price: u64, new_quantity: u64) -> bool {
        let Some(&key) = self.index.get(&order_id) else {
            return false;
        };

        let node = self.orders.get(key).expect("indexed key must be live");
        let side = node.order.side;
        let old_price = node.price();
        let old_quantity = node.quantity();

        if old_price != new_price {
            match side {
                Side::Buy => self.bids.route_out(key, &mut self.orders),
                Side::Sell => self.asks.route_out(key, &mut self.orders),
            }

            let order = &mut self.orders.get_mut(key).expect("indexed key must be live").order;
            order.price = new_price;
            order.quantity = new_quantity;

            match side {
                Side::Buy => self.bids.route_in(key, &mut self.orders),
                Side::Sell => self.asks.route_in(key, &mut self.orders),
            }
            return true;
        }

        if old_quantity != new_quantity {
            self.orders
                .get_mut(key)
                .expect("indexed key must be live")
                .order
                .quantity = new_quantity;

            let ladder = match side {
                Side::Buy => &mut self.bids,
                Side::Sell => &mut self.asks,
            };
            ladder
                .level_mut(old_price)
                .expect("resting order must have a level")
                .adjust_quantity(old_quantity, new_quantity);
        }

        true
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Best bid price (highest buy price), if any
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.best_price()
    }

    /// Best ask price (lowest sell price), if any
    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.best_price()
    }

    /// Spread (best_ask - best_bid), None if either side is empty
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    /// Borrow a resting order by ID
    pub fn order(&self, order_id: u64) -> Option<&Order> {
        let key = *self.index.get(&order_id)?;
        self.orders.get(key).map(|node| &node.order)
    }

    /// Aggregated top-of-book view, at most `depth` levels per side.
    ///
    /// Pure O(depth) read: totals are maintained incrementally, so the
    /// cost is independent of how many orders rest in the book.
    pub fn snapshot(&self, depth: usize) -> DepthSnapshot {
        DepthSnapshot {
            bids: self.bids.depth(depth),
            asks: self.asks.depth(depth),
        }
    }

    /// Order IDs resting at one level, FIFO (oldest first).
    ///
    /// Empty if no level exists at that price.
    pub fn level_orders(&self, side: Side, price: u64) -> Vec<u64> {
        let ladder = match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        };
        match ladder.level(price) {
            Some(level) => level
                .iter_fifo(&self.orders)
                .map(|key| self.orders[key].order_id())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Format a depth-limited view for display.
    ///
    /// Purely presentational, derived solely from [`snapshot`]; asks print
    /// above bids in the classic ladder layout.
    ///
    /// [`snapshot`]: OrderBook::snapshot
    pub fn render(&self, depth: usize) -> String {
        self.snapshot(depth).to_string()
    }

    /// Remove every resting order
    pub fn clear(&mut self) {
        self.orders.clear();
        self.bids = Ladder::new(Side::Buy);
        self.asks = Ladder::new(Side::Sell);
        self.index.clear();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn buy(id: u64, price: u64, quantity: u64) -> Order {
        Order::new(id, Side::Buy, price, quantity, 0)
    }

    fn sell(id: u64, price: u64, quantity: u64) -> Order {
        Order::new(id, Side::Sell, price, quantity, 0)
    }

    #[test]
    fn test_book_new() {
        let book = OrderBook::new();

        assert!(book.is_empty());
        assert_eq!(book.order_count(), 0);
        assert_eq!(book.bid_count(), 0);
        assert_eq!(book.ask_count(), 0);
        assert!(book.best_bid().is_none());
        assert!(book.best_ask().is_none());
    }

    #[test]
    fn test_book_with_capacity() {
        let book = OrderBook::with_capacity(10_000);

        assert!(book.capacity() >= 10_000);
        assert!(book.is_empty());
    }

    #[test]
    fn test_add_buy_order() {
        let mut book = OrderBook::new();

        assert!(book.add_order(buy(1, 10_000_000_000, 10)));

        assert_eq!(book.order_count(), 1);
        assert_eq!(book.bid_count(), 1);
        assert_eq!(book.ask_count(), 0);
        assert_eq!(book.best_bid(), Some(10_000_000_000));
        assert!(book.best_ask().is_none());
    }

    #[test]
    fn test_add_sell_order() {
        let mut book = OrderBook::new();

        assert!(book.add_order(sell(1, 10_100_000_000, 25)));

        assert_eq!(book.order_count(), 1);
        assert_eq!(book.bid_count(), 0);
        assert_eq!(book.ask_count(), 1);
        assert_eq!(book.best_ask(), Some(10_100_000_000));
    }

    #[test]
    fn test_duplicate_add_is_a_no_op() {
        let mut book = OrderBook::new();

        assert!(book.add_order(buy(1, 10_000_000_000, 10)));
        let before = book.snapshot(10);

        // Second add with the same ID: rejected, nothing mutates
        assert!(!book.add_order(buy(1, 9_900_000_000, 99)));

        assert_eq!(book.order_count(), 1);
        assert_eq!(book.snapshot(10), before);
        assert_eq!(book.order(1).unwrap().quantity, 10);
    }

    #[test]
    fn test_cancel_order() {
        let mut book = OrderBook::new();

        book.add_order(buy(42, 10_000_000_000, 10));
        assert!(book.cancel_order(42));

        assert_eq!(book.order_count(), 0);
        assert!(book.best_bid().is_none());
        assert!(!book.contains_order(42));
    }

    #[test]
    fn test_cancel_absent_returns_false() {
        let mut book = OrderBook::new();

        assert!(!book.cancel_order(999));
        assert_eq!(book.order_count(), 0);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut book = OrderBook::new();

        book.add_order(buy(1, 10_000_000_000, 10));
        assert!(book.cancel_order(1));
        assert!(!book.cancel_order(1));
        assert_eq!(book.order_count(), 0);
    }

    #[test]
    fn test_id_reusable_after_cancel() {
        let mut book = OrderBook::new();

        book.add_order(buy(1, 10_000_000_000, 10));
        book.cancel_order(1);

        // ABSENT again, so the ID may rest anew
        assert!(book.add_order(sell(1, 10_200_000_000, 5)));
        assert_eq!(book.ask_count(), 1);
    }

    #[test]
    fn test_amend_absent_returns_false() {
        let mut book = OrderBook::new();

        assert!(!book.amend_order(7, 10_000_000_000, 10));
    }

    #[test]
    fn test_amend_quantity_only() {
        let mut book = OrderBook::new();

        book.add_order(buy(1, 10_000_000_000, 10));
        book.add_order(buy(2, 10_000_000_000, 20));

        assert!(book.amend_order(1, 10_000_000_000, 50));

        let snap = book.snapshot(1);
        assert_eq!(snap.bids[0].quantity, 70);

        // Queue position is untouched
        assert_eq!(book.level_orders(Side::Buy, 10_000_000_000), vec![1, 2]);
    }

    #[test]
    fn test_amend_price_moves_to_back_of_new_level() {
        let mut book = OrderBook::new();

        book.add_order(buy(1, 10_000_000_000, 10));
        book.add_order(buy(2, 9_900_000_000, 20));

        // Move order 1 down to order 2's level: it queues behind 2
        assert!(book.amend_order(1, 9_900_000_000, 10));

        assert_eq!(book.bid_levels(), 1);
        assert_eq!(book.level_orders(Side::Buy, 9_900_000_000), vec![2, 1]);
        assert_eq!(book.snapshot(1).bids[0].quantity, 30);
    }

    #[test]
    fn test_amend_no_change_is_ok() {
        let mut book = OrderBook::new();

        book.add_order(buy(1, 10_000_000_000, 10));
        assert!(book.amend_order(1, 10_000_000_000, 10));

        assert_eq!(book.order_count(), 1);
        assert_eq!(book.snapshot(1).bids[0].quantity, 10);
    }

    #[test]
    fn test_amend_price_creates_and_prunes_levels() {
        let mut book = OrderBook::new();

        book.add_order(sell(1, 10_100_000_000, 25));
        assert!(book.amend_order(1, 10_300_000_000, 25));

        assert_eq!(book.ask_levels(), 1);
        assert!(book.level_orders(Side::Sell, 10_100_000_000).is_empty());
        assert_eq!(book.best_ask(), Some(10_300_000_000));
    }

    #[test]
    fn test_zero_quantity_rests_until_cancelled() {
        let mut book = OrderBook::new();

        book.add_order(buy(1, 10_000_000_000, 0));

        assert_eq!(book.order_count(), 1);
        assert_eq!(book.snapshot(1).bids[0].quantity, 0);

        assert!(book.amend_order(1, 10_000_000_000, 0));
        assert_eq!(book.order_count(), 1);

        assert!(book.cancel_order(1));
        assert_eq!(book.order_count(), 0);
    }

    #[test]
    fn test_spread() {
        let mut book = OrderBook::new();

        assert!(book.spread().is_none());

        book.add_order(buy(1, 10_000_000_000, 10));
        assert!(book.spread().is_none());

        book.add_order(sell(2, 10_100_000_000, 10));
        assert_eq!(book.spread(), Some(100_000_000));
    }

    #[test]
    fn test_empty_level_never_surfaces() {
        let mut book = OrderBook::new();

        book.add_order(buy(1, 10_000_000_000, 10));
        book.add_order(buy(2, 9_900_000_000, 20));
        book.cancel_order(1);

        let snap = book.snapshot(10);
        assert_eq!(snap.bids.len(), 1);
        assert_eq!(snap.bids[0].price, 9_900_000_000);
        assert_eq!(book.bid_levels(), 1);
    }

    #[test]
    fn test_render_reflects_snapshot() {
        let mut book = OrderBook::new();

        book.add_order(buy(1, 10_000_000_000, 30));
        book.add_order(sell(2, 10_150_000_000, 15));

        let text = book.render(5);
        assert!(text.contains("100"));
        assert!(text.contains("101.5"));
        assert!(text.contains("30"));
        assert!(text.contains("15"));
    }

    #[test]
    fn test_clear() {
        let mut book = OrderBook::new();

        book.add_order(buy(1, 10_000_000_000, 10));
        book.add_order(sell(2, 10_100_000_000, 20));
        book.clear();

        assert!(book.is_empty());
        assert_eq!(book.bid_count(), 0);
        assert_eq!(book.ask_count(), 0);
        assert!(book.best_bid().is_none());
        assert!(book.best_ask().is_none());
        assert!(book.snapshot(5).is_empty());
    }
}
