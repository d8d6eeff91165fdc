//! Fixed-point price utilities.
//!
//! ## Overview
//!
//! All prices in tickbook are `u64` tick counts scaled by 10^8, giving
//! 8 decimal places. The book core only ever sees ticks; conversion to and
//! from human decimal notation happens here, at the boundary, through
//! `rust_decimal`.
//!
//! ## Why Fixed-Point?
//!
//! Price levels are keyed by price. Keying an ordered map by floating-point
//! values makes equality fragile (a level lookup that misses by 1 ulp
//! orphans an order). Integer ticks make level identity exact.
//!
//! ## Examples
//!
//! ```
//! use tickbook::types::price::{to_fixed, from_fixed};
//!
//! let price = to_fixed("50000.12345678").unwrap();
//! assert_eq!(price, 5_000_012_345_678);
//! assert_eq!(from_fixed(price), "50000.12345678");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use thiserror::Error;

/// Scaling factor for fixed-point arithmetic: 10^8
///
/// This provides 8 decimal places of precision.
pub const SCALE: u64 = 100_000_000;

/// Maximum whole-number price that can be safely represented
///
/// u64::MAX / SCALE ≈ 184,467,440,737 (184 billion)
pub const MAX_VALUE: u64 = u64::MAX / SCALE;

/// Failure converting a decimal value into ticks.
///
/// Only boundary conversions can fail; once a price is in ticks every book
/// operation on it is total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// The input was not a parsable decimal literal
    #[error("invalid price literal: {0:?}")]
    Invalid(String),

    /// Negative prices have no tick representation
    #[error("price must not be negative")]
    Negative,

    /// The scaled value does not fit in u64
    #[error("price exceeds maximum representable value")]
    OutOfRange,
}

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to ticks
///
/// # Arguments
///
/// * `s` - Decimal string (e.g., "50000.12345678")
///
/// # Example
///
/// ```
/// use tickbook::types::price::to_fixed;
///
/// assert_eq!(to_fixed("1.0"), Ok(100_000_000));
/// assert_eq!(to_fixed("0.00000001"), Ok(1));
/// assert!(to_fixed("-1.0").is_err());
/// assert!(to_fixed("abc").is_err());
/// ```
pub fn to_fixed(s: &str) -> Result<u64, PriceError> {
    let decimal = Decimal::from_str(s).map_err(|_| PriceError::Invalid(s.to_string()))?;
    decimal_to_fixed(decimal)
}

/// Convert a `Decimal` to ticks
///
/// Fractions finer than 10^-8 are rounded to the nearest tick.
pub fn decimal_to_fixed(d: Decimal) -> Result<u64, PriceError> {
    if d.is_sign_negative() && !d.is_zero() {
        return Err(PriceError::Negative);
    }

    let scaled = d
        .checked_mul(Decimal::from(SCALE))
        .ok_or(PriceError::OutOfRange)?;
    scaled.round_dp(0).to_u64().ok_or(PriceError::OutOfRange)
}

/// Convert ticks to a `Decimal`
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Convert ticks to a string with 8 decimal places
///
/// # Example
///
/// ```
/// use tickbook::types::price::from_fixed;
///
/// assert_eq!(from_fixed(100_000_000), "1.00000000");
/// assert_eq!(from_fixed(5_000_012_345_678), "50000.12345678");
/// ```
pub fn from_fixed(value: u64) -> String {
    format!("{:.8}", fixed_to_decimal(value))
}

/// Convert ticks to a human-readable string (trailing zeros trimmed)
///
/// # Example
///
/// ```
/// use tickbook::types::price::from_fixed_trimmed;
///
/// assert_eq!(from_fixed_trimmed(100_000_000), "1");
/// assert_eq!(from_fixed_trimmed(150_000_000), "1.5");
/// assert_eq!(from_fixed_trimmed(123_456_789), "1.23456789");
/// ```
pub fn from_fixed_trimmed(value: u64) -> String {
    format!("{}", fixed_to_decimal(value).normalize())
}

// ============================================================================
// Unit Tests
// ============================================================================
