//! Core data types for tickbook
//!
//! ## Types
//!
//! - [`Order`]: A resting limit order
//! - [`Side`]: Buy or Sell
//! - [`LevelView`] / [`DepthSnapshot`]: Aggregated depth views
//!
//! ## Fixed-Point Arithmetic
//!
//! All prices are stored as `u64` ticks scaled by 10^8.
//! Example: 50000.12345678 is stored as 5_000_012_345_678u64.
//! Quantities are plain unit counts.

mod depth;
mod order;
pub mod price;

// Re-export all types at module level
pub use depth::{DepthSnapshot, LevelView};
pub use order::{Order, Side};
