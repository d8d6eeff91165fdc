//! Ladder: one side's ordered mapping from price to [`PriceLevel`].
//!
//! Both sides share one representation: a `BTreeMap` keyed by ascending
//! tick price. Priority order falls out of which end is "best":
//!
//! - **Asks**: lowest price is best, iterate front-to-back
//! - **Bids**: highest price is best, iterate back-to-front
//!
//! Levels are created lazily on the first order routed to a price and
//! erased eagerly as soon as their queue empties, so an existing level
//! always holds at least one order.

use std::collections::BTreeMap;

use slab::Slab;

use crate::book::{OrderNode, PriceLevel};
use crate::types::{LevelView, Side};

/// Price-ordered levels for a single side of the book.
#[derive(Debug, Clone)]
pub struct Ladder {
    /// Which side this ladder holds
    side: Side,

    /// Levels keyed by tick price, ascending
    levels: BTreeMap<u64, PriceLevel>,

    /// Orders currently resting across all levels
    orders: usize,
}

impl Ladder {
    /// Create an empty ladder for the given side
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
            orders: 0,
        }
    }

    /// The side this ladder holds
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Number of distinct price levels
    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Number of resting orders across all levels
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders
    }

    /// True when no orders rest on this side
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Best price for this side, if any level exists
    ///
    /// Asks: the lowest price. Bids: the highest.
    pub fn best_price(&self) -> Option<u64> {
        match self.side {
            Side::Sell => self.levels.keys().next().copied(),
            Side::Buy => self.levels.keys().next_back().copied(),
        }
    }

    /// Borrow the level at an exact price
    #[inline]
    pub fn level(&self, price: u64) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    /// Mutably borrow the level at an exact price
    #[inline]
    pub fn level_mut(&mut self, price: u64) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&price)
    }

    /// Route an order into this side: look up or create the level for the
    /// node's price and append at the tail of its queue.
    ///
    /// # Panics
    ///
    /// Panics if the key doesn't exist in the slab.
    pub fn route_in(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let price = slab.get(key).expect("invalid slab key").price();
        let level = self
            .levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price));
        level.push_back(key, slab);
        self.orders += 1;
    }

    /// Route an order out of this side: unlink it from its level's queue
    /// and erase the level if that left it empty.
    ///
    /// # Panics
    ///
    /// Panics if the key doesn't exist in the slab or the node is not
    /// resting in one of this ladder's levels.
    pub fn route_out(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let price = slab.get(key).expect("invalid slab key").price();
        let level = self.levels.get_mut(&price).expect("no level at node price");
        level.remove(key, slab);
        self.orders -= 1;

        if level.is_empty() {
            self.levels.remove(&price);
        }
    }

    /// Iterate levels best-first
    pub fn iter_best(&self) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        match self.side {
            Side::Sell => Box::new(self.levels.values()),
            Side::Buy => Box::new(self.levels.values().rev()),
        }
    }

    /// The first `depth` levels in priority order as aggregated views
    pub fn depth(&self, depth: usize) -> Vec<LevelView> {
        self.iter_best()
            .take(depth)
            .map(|level| LevelView::new(level.price, level.total_quantity()))
            .collect()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
