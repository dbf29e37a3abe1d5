//! # Line Items
//!
//! One cart entry: a product, its unit price, a quantity, and optional
//! per-line discounts.
//!
//! ## Discount Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal = unit_price × quantity                                       │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  fixed    = min(fixed_per_unit × quantity, subtotal)     ① fixed first  │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  percent  = (subtotal − fixed) × clamp(pct, 0, 100)/100  ② on remainder │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  discount = min(fixed + percent, subtotal)               ③ final cap    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Percent-then-fixed gives different totals and is not what we charge.

use serde::{Deserialize, Serialize};

use crate::error::MoneyError;
use crate::money::{in_range, Money};
use crate::types::Percent;

/// One priced, quantified product entry in the cart.
///
/// Fields are public for display; only the owning register mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    /// Applied to what is left after the fixed discount.
    pub percent_discount: Percent,
    pub fixed_discount_per_unit: Option<Money>,
}

impl LineItem {
    /// Creates an undiscounted line with quantity 1.
    pub fn new(name: impl Into<String>, unit_price: Money) -> Self {
        LineItem {
            name: name.into(),
            unit_price,
            quantity: 1,
            percent_discount: Percent::zero(),
            fixed_discount_per_unit: None,
        }
    }

    /// Unit price × quantity.
    ///
    /// ## Panics
    /// When the line is beyond Money's range; [`try_subtotal`](Self::try_subtotal)
    /// reports that as an error instead. The same holds for
    /// [`discount`](Self::discount) and [`total`](Self::total).
    #[track_caller]
    pub fn subtotal(&self) -> Money {
        in_range(self.try_subtotal())
    }

    /// Total discount for the line, never more than [`subtotal`](Self::subtotal).
    ///
    /// ## Example
    /// ```rust
    /// use till_core::{LineItem, Money, Percent};
    ///
    /// let mut item = LineItem::new("Eggs", Money::from_cents(1000));
    /// item.quantity = 2;                                       // $20.00
    /// item.fixed_discount_per_unit = Some(Money::from_cents(100)); // -$2.00
    /// item.percent_discount = Percent::from(10);               // 10% of $18.00
    /// assert_eq!(item.discount().to_string(), "$3.80");
    /// assert_eq!(item.total().to_string(), "$16.20");
    /// ```
    #[track_caller]
    pub fn discount(&self) -> Money {
        in_range(self.try_discount())
    }

    /// Subtotal minus discount.
    #[track_caller]
    pub fn total(&self) -> Money {
        in_range(self.try_total())
    }

    pub fn try_subtotal(&self) -> Result<Money, MoneyError> {
        self.unit_price.checked_multiply_quantity(self.quantity)
    }

    pub fn try_discount(&self) -> Result<Money, MoneyError> {
        let subtotal = self.try_subtotal()?;

        let fixed = match self.fixed_discount_per_unit {
            Some(per_unit) => per_unit.checked_multiply_quantity(self.quantity)?.min(subtotal),
            None => Money::zero(),
        };

        let remainder = subtotal.checked_subtract(fixed)?;
        let percent_amount = remainder.checked_apply_percent(self.percent_discount)?;

        Ok(fixed.checked_add(percent_amount)?.min(subtotal))
    }

    pub fn try_total(&self) -> Result<Money, MoneyError> {
        self.try_subtotal()?.checked_subtract(self.try_discount()?)
    }

    /// True when either discount field is set to something non-zero.
    pub fn has_discounts(&self) -> bool {
        !self.percent_discount.is_zero()
            || self
                .fixed_discount_per_unit
                .is_some_and(|fixed| !fixed.is_zero())
    }

    /// Resets both discount fields; name, price and quantity stay.
    pub fn clear_discounts(&mut self) {
        self.percent_discount = Percent::zero();
        self.fixed_discount_per_unit = None;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(cents: i64, qty: i64) -> LineItem {
        let mut item = LineItem::new("Widget", Money::from_cents(cents));
        item.quantity = qty;
        item
    }

    #[test]
    fn test_subtotal() {
        assert_eq!(item(349, 2).subtotal().cents(), 698);
    }

    #[test]
    fn test_no_discount() {
        let line = item(229, 1);
        assert!(line.discount().is_zero());
        assert_eq!(line.total(), line.subtotal());
        assert!(!line.has_discounts());
    }

    #[test]
    fn test_percent_discount_rounds_half_up() {
        let mut line = item(419, 1);
        line.percent_discount = Percent::from(5);
        // 4.19 × 5% = 0.2095 → 0.21
        assert_eq!(line.discount().cents(), 21);
        assert_eq!(line.total().cents(), 398);
    }

    #[test]
    fn test_fixed_applied_before_percent() {
        let mut line = item(1000, 1);
        line.fixed_discount_per_unit = Some(Money::from_cents(200));
        line.percent_discount = Percent::from(50);
        // fixed first: 2.00 + 50% of 8.00 = 6.00
        // (percent first would give 5.00 + 2.00 = 7.00)
        assert_eq!(line.discount().cents(), 600);
    }

    #[test]
    fn test_fixed_discount_capped_to_subtotal() {
        let mut line = item(300, 2);
        line.fixed_discount_per_unit = Some(Money::from_cents(500));
        assert_eq!(line.discount().cents(), 600);
        assert!(line.total().is_zero());
    }

    #[test]
    fn test_percent_clamped() {
        let mut line = item(1000, 1);
        line.percent_discount = Percent::from(250);
        assert_eq!(line.discount().cents(), 1000);

        line.percent_discount = Percent::new(dec!(-10));
        assert!(line.discount().is_zero());
    }

    #[test]
    fn test_full_percent_zeroes_total_regardless_of_fixed() {
        let mut line = item(999, 3);
        line.percent_discount = Percent::from(100);
        line.fixed_discount_per_unit = Some(Money::from_cents(123));
        assert!(line.total().is_zero());
        assert_eq!(line.discount(), line.subtotal());
    }

    #[test]
    fn test_out_of_range_line_is_an_error() {
        let mut line = LineItem::new("Big", Money::from_value("1e20").unwrap());
        line.quantity = 10_000_000_000;

        assert_eq!(line.try_subtotal(), Err(MoneyError::Overflow));
        assert_eq!(line.try_discount(), Err(MoneyError::Overflow));
        assert_eq!(line.try_total(), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_try_variants_match_plain_queries() {
        let mut line = item(1000, 2);
        line.fixed_discount_per_unit = Some(Money::from_cents(100));
        line.percent_discount = Percent::from(10);

        assert_eq!(line.try_subtotal(), Ok(line.subtotal()));
        assert_eq!(line.try_discount(), Ok(line.discount()));
        assert_eq!(line.try_total(), Ok(line.total()));
    }

    #[test]
    fn test_clear_discounts_keeps_line() {
        let mut line = item(500, 4);
        line.percent_discount = Percent::from(10);
        line.fixed_discount_per_unit = Some(Money::from_cents(50));
        assert!(line.has_discounts());

        line.clear_discounts();
        assert!(!line.has_discounts());
        assert_eq!(line.quantity, 4);
        assert_eq!(line.unit_price.cents(), 500);
        assert_eq!(line.name, "Widget");
    }
}
