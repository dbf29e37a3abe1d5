//! # Domain Types
//!
//! Small value types shared by line items and the register.
//!
//! ## Percent
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stored as typed          Used as clamped fraction                      │
//! │  ───────────────          ────────────────────────                      │
//! │  "8.25"  → 8.25           0.0825                                        │
//! │  "5"     → 5              0.05                                          │
//! │  "150"   → 150            1.00   (clamped to 100)                       │
//! │  "-3"    → -3             0.00   (clamped to 0)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! The typed value is kept so the receipt prints what the cashier entered.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::MoneyError;

// =============================================================================
// Percent
// =============================================================================

/// A percentage such as a tax rate or discount, e.g. `8.25` for 8.25%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a percent from its decimal value (`8.25` = 8.25%).
    #[inline]
    pub const fn new(value: Decimal) -> Self {
        Percent(value)
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(Decimal::ZERO)
    }

    /// Returns the value as entered, without clamping.
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the value limited to `[0, 100]`.
    pub fn clamped(&self) -> Decimal {
        self.0.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }

    /// Returns the clamped value divided by 100.
    #[inline]
    pub fn fraction(&self) -> Decimal {
        self.clamped() / Decimal::ONE_HUNDRED
    }
}

impl From<Decimal> for Percent {
    fn from(value: Decimal) -> Self {
        Percent(value)
    }
}

impl From<i64> for Percent {
    fn from(value: i64) -> Self {
        Percent(Decimal::from(value))
    }
}

/// Parses `8.25`, `8.25%`, or `1e1`.
impl FromStr for Percent {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        Decimal::from_str(digits)
            .or_else(|_| Decimal::from_scientific(digits))
            .map(Percent)
            .map_err(|_| MoneyError::Parse(s.to_string()))
    }
}

/// Prints the value as entered, without a `%` sign.
impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_keeps_entered_form() {
        let p: Percent = "8.25".parse().unwrap();
        assert_eq!(p.to_string(), "8.25");

        let p: Percent = "5".parse().unwrap();
        assert_eq!(p.to_string(), "5");

        let p: Percent = " 10% ".parse().unwrap();
        assert_eq!(p.value(), dec!(10));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("ten".parse::<Percent>().is_err());
        assert!("".parse::<Percent>().is_err());
    }

    #[test]
    fn test_clamping() {
        assert_eq!(Percent::from(150).clamped(), dec!(100));
        assert_eq!(Percent::from(-3).clamped(), dec!(0));
        assert_eq!(Percent::new(dec!(8.25)).fraction(), dec!(0.0825));
        // stored value is untouched
        assert_eq!(Percent::from(150).value(), dec!(150));
    }

    #[test]
    fn test_default_is_zero() {
        assert!(Percent::default().is_zero());
        assert_eq!(Percent::zero().fraction(), dec!(0));
    }
}
