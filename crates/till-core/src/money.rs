//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 decimal, re-quantized to cents                   │
//! │    3.49 × 2        = 6.98                                               │
//! │    13.25 × 10%     = 1.325  → 1.33 (half-up)                           │
//! │    11.92 × 8.25%   = 0.9834 → 0.98                                     │
//! │                                                                         │
//! │  Rounding happens after EVERY operation, never deferred.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::money::Money;
//!
//! let price: Money = "$3.49".parse().unwrap();
//! let doubled = price.multiply_quantity(2);
//! assert_eq!(doubled.to_string(), "$6.98");
//!
//! // Floats go through their decimal string, never binary math
//! let from_float = Money::try_from(0.125_f64).unwrap();
//! assert_eq!(from_float.to_string(), "$0.13");
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::MoneyError;
use crate::types::Percent;

/// Number of fractional digits every Money value carries.
pub const CENT_PLACES: u32 = 2;

/// Rounds half-up (away from zero) to whole cents and pins the scale to 2.
///
/// `rescale` silently keeps fewer places when the integer part is too wide
/// for two more digits, so that case is reported as out of range.
fn quantize(value: Decimal) -> Result<Decimal, MoneyError> {
    let mut cents = value.round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(CENT_PLACES);
    if cents.scale() != CENT_PLACES {
        return Err(MoneyError::Overflow);
    }
    if cents.is_zero() {
        cents.set_sign_positive(true);
    }
    Ok(cents)
}

/// Unwraps an arithmetic result the way `Decimal`'s own operators do.
#[track_caller]
pub(crate) fn in_range<T>(result: Result<T, MoneyError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

/// Converts a float through its shortest round-trip decimal text.
fn float_to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    parse_decimal(&value.to_string())
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

// =============================================================================
// Money Type
// =============================================================================

/// An immutable monetary amount, always exact to the cent.
///
/// ## Invariant
/// The inner decimal has scale 2 and was rounded half-up. Every constructor
/// and every arithmetic method goes through the same quantize step, so two
/// equal amounts always compare and print the same.
///
/// ## Range
/// A 96-bit mantissa at scale 2 tops out at [`Money::MAX`]
/// (`$792281625142643375935439503.35`). Anything wider is
/// `MoneyError::Overflow` from the fallible constructors and `checked_*`
/// methods; the operator impls panic instead, like `Decimal`'s.
///
/// ## Where Money is Used
/// ```text
/// LineItem.unit_price ──► LineItem.subtotal ──► LineItem.total
///                                                    │
/// Register.subtotal_before_discounts ◄───────────────┘
///      │
///      ▼
/// order discount ──► pre-tax ──► tax ──► grand total ──► change
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Largest representable amount.
    pub const MAX: Money = Money(Decimal::from_parts(
        u32::MAX,
        u32::MAX,
        u32::MAX,
        false,
        CENT_PLACES,
    ));

    /// Smallest (most negative) representable amount.
    pub const MIN: Money = Money(Decimal::from_parts(
        u32::MAX,
        u32::MAX,
        u32::MAX,
        true,
        CENT_PLACES,
    ));

    /// Creates a Money value from whole cents.
    ///
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, CENT_PLACES))
    }

    /// Creates a Money value from any decimal, rounding half-up to cents.
    ///
    /// ## Errors
    /// `MoneyError::Overflow` when the amount is beyond [`Money::MAX`].
    ///
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use till_core::money::Money;
    ///
    /// let m = Money::from_decimal(Decimal::new(1325, 3)).unwrap(); // 1.325
    /// assert_eq!(m.to_string(), "$1.33");
    /// assert!(Money::from_decimal(Decimal::MAX).is_err());
    /// ```
    #[inline]
    pub fn from_decimal(amount: Decimal) -> Result<Self, MoneyError> {
        quantize(amount).map(Money)
    }

    /// Builds Money from any supported input kind.
    ///
    /// Text may carry a leading `$` and thousands separators. Floats are
    /// read through their decimal text form before rounding.
    ///
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_value("$1,234.565").unwrap().to_string(), "$1234.57");
    /// assert_eq!(Money::from_value(3).unwrap().to_string(), "$3.00");
    /// assert!(Money::from_value("abc").is_err());
    /// ```
    pub fn from_value(value: impl Into<MoneyValue>) -> Result<Self, MoneyError> {
        match value.into() {
            MoneyValue::Money(money) => Ok(money),
            MoneyValue::Decimal(amount) => Money::from_decimal(amount),
            MoneyValue::Integer(units) => Ok(Money::from(units)),
            MoneyValue::Float(value) => float_to_decimal(value)
                .ok_or_else(|| MoneyError::NonFinite(value.to_string()))
                .and_then(Money::from_decimal),
            MoneyValue::Text(text) => {
                let cleaned: String = text
                    .trim()
                    .chars()
                    .filter(|c| *c != '$' && *c != ',')
                    .collect();
                parse_decimal(cleaned.trim())
                    .ok_or(MoneyError::Parse(text))
                    .and_then(Money::from_decimal)
            }
        }
    }

    /// Returns zero money value.
    #[inline]
    pub fn zero() -> Self {
        Money(Decimal::new(0, CENT_PLACES))
    }

    /// Returns the amount as a decimal with exactly two places.
    #[inline]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub fn cents(&self) -> i128 {
        self.0.mantissa()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// ## Panics
    /// When the sum is out of range; see [`checked_add`](Self::checked_add).
    #[inline]
    #[track_caller]
    pub fn add(&self, other: Money) -> Money {
        in_range(self.checked_add(other))
    }

    /// ## Panics
    /// When the difference is out of range; see
    /// [`checked_subtract`](Self::checked_subtract).
    #[inline]
    #[track_caller]
    pub fn subtract(&self, other: Money) -> Money {
        in_range(self.checked_subtract(other))
    }

    pub fn checked_add(&self, other: Money) -> Result<Money, MoneyError> {
        self.0
            .checked_add(other.0)
            .ok_or(MoneyError::Overflow)
            .and_then(Money::from_decimal)
    }

    pub fn checked_subtract(&self, other: Money) -> Result<Money, MoneyError> {
        self.0
            .checked_sub(other.0)
            .ok_or(MoneyError::Overflow)
            .and_then(Money::from_decimal)
    }

    /// Scales the amount, re-quantizing the product to cents.
    ///
    /// ## Errors
    /// - `MoneyError::InvalidMultiplier` for NaN or infinite floats
    /// - `MoneyError::Overflow` when the product is out of range
    ///
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use till_core::money::Money;
    ///
    /// let price = Money::from_cents(1000);
    /// assert_eq!(price.multiply(3).unwrap().to_string(), "$30.00");
    /// assert_eq!(price.multiply(0.1).unwrap().to_string(), "$1.00");
    /// assert_eq!(price.multiply(Decimal::new(3333, 4)).unwrap().to_string(), "$3.33");
    /// assert!(price.multiply(f64::NAN).is_err());
    /// ```
    pub fn multiply(&self, multiplier: impl Into<Multiplier>) -> Result<Money, MoneyError> {
        let factor = match multiplier.into() {
            Multiplier::Integer(n) => Decimal::from(n),
            Multiplier::Decimal(d) => d,
            Multiplier::Float(f) => float_to_decimal(f)
                .ok_or_else(|| MoneyError::InvalidMultiplier(f.to_string()))?,
        };
        self.scaled_by(factor)
    }

    /// Multiplies money by an integer quantity.
    ///
    /// ## Panics
    /// When the product is out of range; see
    /// [`checked_multiply_quantity`](Self::checked_multiply_quantity).
    #[inline]
    #[track_caller]
    pub fn multiply_quantity(&self, qty: i64) -> Money {
        in_range(self.checked_multiply_quantity(qty))
    }

    /// Exact under decimal arithmetic; the only failure is range.
    pub fn checked_multiply_quantity(&self, qty: i64) -> Result<Money, MoneyError> {
        self.scaled_by(Decimal::from(qty))
    }

    /// Returns `percent` of this amount, rounded half-up to the cent.
    ///
    /// The percentage is clamped to 0-100 first.
    ///
    /// ```rust
    /// use till_core::money::Money;
    /// use till_core::types::Percent;
    ///
    /// let base = Money::from_cents(1325);
    /// let pct: Percent = "10".parse().unwrap();
    /// assert_eq!(base.apply_percent(pct).to_string(), "$1.33");
    /// ```
    #[inline]
    #[track_caller]
    pub fn apply_percent(&self, percent: Percent) -> Money {
        in_range(self.checked_apply_percent(percent))
    }

    pub fn checked_apply_percent(&self, percent: Percent) -> Result<Money, MoneyError> {
        self.scaled_by(percent.fraction())
    }

    fn scaled_by(&self, factor: Decimal) -> Result<Money, MoneyError> {
        self.0
            .checked_mul(factor)
            .ok_or(MoneyError::Overflow)
            .and_then(Money::from_decimal)
    }

    /// Returns the lesser of two amounts.
    #[inline]
    pub fn min(self, other: Money) -> Money {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }
}

// =============================================================================
// Input Kinds
// =============================================================================

/// Every input kind accepted by [`Money::from_value`].
#[derive(Debug, Clone, PartialEq)]
pub enum MoneyValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Decimal(Decimal),
    Money(Money),
}

impl From<&str> for MoneyValue {
    fn from(value: &str) -> Self {
        MoneyValue::Text(value.to_string())
    }
}

impl From<String> for MoneyValue {
    fn from(value: String) -> Self {
        MoneyValue::Text(value)
    }
}

impl From<i64> for MoneyValue {
    fn from(value: i64) -> Self {
        MoneyValue::Integer(value)
    }
}

impl From<i32> for MoneyValue {
    fn from(value: i32) -> Self {
        MoneyValue::Integer(i64::from(value))
    }
}

impl From<f64> for MoneyValue {
    fn from(value: f64) -> Self {
        MoneyValue::Float(value)
    }
}

impl From<Decimal> for MoneyValue {
    fn from(value: Decimal) -> Self {
        MoneyValue::Decimal(value)
    }
}

impl From<Money> for MoneyValue {
    fn from(value: Money) -> Self {
        MoneyValue::Money(value)
    }
}

/// Scalars accepted by [`Money::multiply`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Multiplier {
    Integer(i64),
    Float(f64),
    Decimal(Decimal),
}

impl From<i64> for Multiplier {
    fn from(value: i64) -> Self {
        Multiplier::Integer(value)
    }
}

impl From<i32> for Multiplier {
    fn from(value: i32) -> Self {
        Multiplier::Integer(i64::from(value))
    }
}

impl From<f64> for Multiplier {
    fn from(value: f64) -> Self {
        Multiplier::Float(value)
    }
}

impl From<Decimal> for Multiplier {
    fn from(value: Decimal) -> Self {
        Multiplier::Decimal(value)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// `"$"` followed by the amount with exactly two decimals.
///
/// Negative amounts print as `$-1.50`; callers that want a leading minus
/// (e.g. `-$0.21` for discounts) add it themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_value(s)
    }
}

impl TryFrom<&str> for Money {
    type Error = MoneyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Money::from_value(value)
    }
}

impl TryFrom<f64> for Money {
    type Error = MoneyError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Money::from_value(value)
    }
}

impl From<i64> for Money {
    fn from(units: i64) -> Self {
        // any i64 × 100 fits a 96-bit mantissa, so the rescale always lands
        let mut amount = Decimal::from(units);
        amount.rescale(CENT_PLACES);
        Money(amount)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Money::from_decimal(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money::add(&self, other)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = Money::add(self, other);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        self.subtract(other)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = self.subtract(other);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
