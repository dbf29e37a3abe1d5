//! # Register
//!
//! Aggregates line items, applies order-level discounts and tax, and works
//! out change.
//!
//! ## Pricing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Register Derived Totals                           │
//! │                                                                         │
//! │  Σ line.subtotal()          subtotal_before_discounts    $13.46         │
//! │  Σ line.discount()        − line_discounts_total          $0.21         │
//! │                           ─────────────────────────────────────         │
//! │                             subtotal_after_line_discounts $13.25        │
//! │  fixed → percent → cap    − order_level_discount          $1.33         │
//! │                           ─────────────────────────────────────         │
//! │                             pre_tax_total                 $11.92        │
//! │  pre_tax × tax%           + tax_amount                     $0.98        │
//! │                           ─────────────────────────────────────         │
//! │                             grand_total                   $12.90        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every query is recomputed from current state on each call. Nothing is
//! cached, so a query after any mutation always sees that mutation.
//!
//! ## Ownership
//! A register is owned by one caller and is not meant for concurrent
//! mutation. Wrap it in a `Mutex` if it ever has to be shared.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, MoneyError, RegisterError};
use crate::line_item::LineItem;
use crate::money::{in_range, Money};
use crate::types::Percent;

// =============================================================================
// New Line Item
// =============================================================================

/// Arguments for [`Register::add_item`].
///
/// ```rust
/// use till_core::{Money, NewLineItem, Percent, Register};
///
/// let mut register = Register::new();
/// register.add_item(
///     NewLineItem::new("Eggs", Money::from_cents(419)).percent_discount(Percent::from(5)),
/// );
/// assert_eq!(register.line_items()[0].quantity, 1);
/// ```
#[derive(Debug, Clone)]
pub struct NewLineItem {
    item: LineItem,
}

impl NewLineItem {
    /// Quantity 1, no discounts.
    pub fn new(name: impl Into<String>, unit_price: Money) -> Self {
        NewLineItem {
            item: LineItem::new(name, unit_price),
        }
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.item.quantity = quantity;
        self
    }

    pub fn percent_discount(mut self, percent: impl Into<Percent>) -> Self {
        self.item.percent_discount = percent.into();
        self
    }

    pub fn fixed_discount_per_unit(mut self, amount: Option<Money>) -> Self {
        self.item.fixed_discount_per_unit = amount;
        self
    }
}

// =============================================================================
// Register
// =============================================================================

/// The cart plus its order-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    tax_rate: Percent,
    line_items: Vec<LineItem>,
    order_percent_discount: Percent,
    order_fixed_discount: Option<Money>,
}

impl Register {
    /// Empty cart, 0% tax, no discounts.
    pub fn new() -> Self {
        Register::default()
    }

    // -------------------------------------------------------------------------
    // Mutators
    // -------------------------------------------------------------------------

    /// Appends a line. Prices and quantities are taken as given.
    pub fn add_item(&mut self, item: NewLineItem) {
        self.line_items.push(item.item);
    }

    /// Removes the line at `index`, shifting later lines down by one.
    ///
    /// ## Errors
    /// `RegisterError::IndexOutOfRange` if `index >= len`; the cart is
    /// left untouched.
    pub fn remove_item(&mut self, index: usize) -> Result<LineItem, RegisterError> {
        if index >= self.line_items.len() {
            return Err(RegisterError::IndexOutOfRange {
                index,
                len: self.line_items.len(),
            });
        }
        Ok(self.line_items.remove(index))
    }

    pub fn clear_items(&mut self) {
        self.line_items.clear();
    }

    pub fn set_tax_rate(&mut self, percent: impl Into<Percent>) {
        self.tax_rate = percent.into();
    }

    /// Replaces (does not add to) the order percent discount.
    pub fn apply_order_percent_discount(&mut self, percent: impl Into<Percent>) {
        self.order_percent_discount = percent.into();
    }

    /// Replaces (does not add to) the order fixed discount.
    pub fn apply_order_fixed_discount(&mut self, amount: Money) {
        self.order_fixed_discount = Some(amount);
    }

    /// Resets order-level and every line's discounts. Cart contents stay.
    pub fn clear_discounts(&mut self) {
        self.order_percent_discount = Percent::zero();
        self.order_fixed_discount = None;
        for item in &mut self.line_items {
            item.clear_discounts();
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Lines in insertion order; slice position is the line index.
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn len(&self) -> usize {
        self.line_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    pub fn tax_rate(&self) -> Percent {
        self.tax_rate
    }

    pub fn order_percent_discount(&self) -> Percent {
        self.order_percent_discount
    }

    pub fn order_fixed_discount(&self) -> Option<Money> {
        self.order_fixed_discount
    }

    // -------------------------------------------------------------------------
    // Derived Totals
    // -------------------------------------------------------------------------
    //
    // Each plain query panics if the cart is beyond Money's range, like
    // `Decimal` arithmetic does. Callers holding untrusted input check
    // `try_totals` first.

    pub fn subtotal_before_discounts(&self) -> Money {
        self.totals().subtotal_before_discounts
    }

    pub fn line_discounts_total(&self) -> Money {
        self.totals().line_discounts_total
    }

    pub fn subtotal_after_line_discounts(&self) -> Money {
        self.totals().subtotal_after_line_discounts
    }

    /// Same fixed → percent → cap order as [`LineItem::discount`], applied
    /// to the post-line-discount subtotal.
    pub fn order_level_discount(&self) -> Money {
        self.totals().order_level_discount
    }

    pub fn pre_tax_total(&self) -> Money {
        self.totals().pre_tax_total
    }

    /// Pre-tax total × tax rate, rounded half-up to the cent.
    ///
    /// The tax rate is used as entered (not clamped).
    pub fn tax_amount(&self) -> Money {
        self.totals().tax_amount
    }

    pub fn grand_total(&self) -> Money {
        self.totals().grand_total
    }

    /// Cash tendered minus grand total.
    ///
    /// ## Errors
    /// - `RegisterError::InsufficientFunds` when tendered < grand total
    /// - `MoneyError::Overflow` when the cart or the change is out of range
    ///
    /// Exact payment returns zero change.
    pub fn compute_change(&self, cash_tendered: Money) -> CoreResult<Money> {
        let due = self.try_totals()?.grand_total;
        let change = cash_tendered.checked_subtract(due)?;
        if change.is_negative() {
            return Err(RegisterError::InsufficientFunds {
                tendered: cash_tendered,
                due,
            }
            .into());
        }
        Ok(change)
    }

    /// Snapshot of every derived total, computed now.
    ///
    /// ## Panics
    /// When any total is out of range; see [`try_totals`](Self::try_totals).
    #[track_caller]
    pub fn totals(&self) -> RegisterTotals {
        in_range(self.try_totals())
    }

    /// Runs the whole pricing pipeline with checked arithmetic.
    ///
    /// ## Errors
    /// `MoneyError::Overflow` if any line or total is out of range.
    pub fn try_totals(&self) -> Result<RegisterTotals, MoneyError> {
        let mut subtotal_before_discounts = Money::zero();
        let mut line_discounts_total = Money::zero();
        for item in &self.line_items {
            // each line's own total is printed on the receipt
            item.try_total()?;
            subtotal_before_discounts =
                subtotal_before_discounts.checked_add(item.try_subtotal()?)?;
            line_discounts_total = line_discounts_total.checked_add(item.try_discount()?)?;
        }
        let subtotal_after_line_discounts =
            subtotal_before_discounts.checked_subtract(line_discounts_total)?;

        let base = subtotal_after_line_discounts;
        let fixed = self.order_fixed_discount.unwrap_or_else(Money::zero).min(base);
        let remainder = base.checked_subtract(fixed)?;
        let percent_amount = remainder.checked_apply_percent(self.order_percent_discount)?;
        let order_level_discount = fixed.checked_add(percent_amount)?.min(base);

        let pre_tax_total = subtotal_after_line_discounts.checked_subtract(order_level_discount)?;

        let rate = self.tax_rate.value() / Decimal::ONE_HUNDRED;
        let tax_amount = pre_tax_total.multiply(rate)?;
        let grand_total = pre_tax_total.checked_add(tax_amount)?;

        Ok(RegisterTotals {
            item_count: self.line_items.len(),
            subtotal_before_discounts,
            line_discounts_total,
            subtotal_after_line_discounts,
            order_level_discount,
            pre_tax_total,
            tax_rate: self.tax_rate,
            tax_amount,
            grand_total,
        })
    }
}

// =============================================================================
// Totals Snapshot
// =============================================================================

/// All derived totals at one point in time, for display or JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterTotals {
    pub item_count: usize,
    pub subtotal_before_discounts: Money,
    pub line_discounts_total: Money,
    pub subtotal_after_line_discounts: Money,
    pub order_level_discount: Money,
    pub pre_tax_total: Money,
    pub tax_rate: Percent,
    pub tax_amount: Money,
    pub grand_total: Money,
}

impl TryFrom<&Register> for RegisterTotals {
    type Error = MoneyError;

    fn try_from(register: &Register) -> Result<Self, Self::Error> {
        register.try_totals()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use rust_decimal_macros::dec;

    fn grocery_register() -> Register {
        let mut register = Register::new();
        register.set_tax_rate(Percent::new(dec!(8.25)));
        register.add_item(NewLineItem::new("Milk", Money::from_cents(349)).quantity(2));
        register.add_item(NewLineItem::new("Bread", Money::from_cents(229)));
        register.add_item(
            NewLineItem::new("Eggs", Money::from_cents(419)).percent_discount(Percent::from(5)),
        );
        register.apply_order_percent_discount(Percent::from(10));
        register
    }

    #[test]
    fn test_grocery_totals() {
        let register = grocery_register();
        assert_eq!(register.subtotal_before_discounts().cents(), 1346);
        assert_eq!(register.line_items()[2].discount().cents(), 21);
        assert_eq!(register.line_discounts_total().cents(), 21);
        assert_eq!(register.subtotal_after_line_discounts().cents(), 1325);
        assert_eq!(register.order_level_discount().cents(), 133);
        assert_eq!(register.pre_tax_total().cents(), 1192);
        assert_eq!(register.tax_amount().cents(), 98);
        assert_eq!(register.grand_total().cents(), 1290);
    }

    #[test]
    fn test_compute_change() {
        let register = grocery_register();
        let change = register.compute_change(Money::from_cents(2000)).unwrap();
        assert_eq!(change.cents(), 710);

        let exact = register.compute_change(Money::from_cents(1290)).unwrap();
        assert!(exact.is_zero());
    }

    #[test]
    fn test_insufficient_funds() {
        let register = grocery_register();
        let err = register.compute_change(Money::from_cents(1289)).unwrap_err();
        assert_eq!(
            err,
            CoreError::Register(RegisterError::InsufficientFunds {
                tendered: Money::from_cents(1289),
                due: Money::from_cents(1290),
            })
        );
    }

    #[test]
    fn test_out_of_range_cart_reports_overflow() {
        let mut register = grocery_register();
        register.add_item(
            NewLineItem::new("Big", Money::from_value("1e20").unwrap()).quantity(10_000_000_000),
        );

        assert_eq!(register.try_totals(), Err(MoneyError::Overflow));
        assert_eq!(
            RegisterTotals::try_from(&register),
            Err(MoneyError::Overflow)
        );
        assert_eq!(
            register.compute_change(Money::from_cents(2000)),
            Err(CoreError::Money(MoneyError::Overflow))
        );

        register.remove_item(3).unwrap();
        assert_eq!(register.try_totals(), Ok(grocery_register().totals()));
    }

    #[test]
    fn test_huge_tax_rate_overflows() {
        let mut register = grocery_register();
        register.set_tax_rate(Percent::new(Decimal::MAX));
        assert_eq!(register.try_totals(), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_change_out_of_range() {
        // a negative tax rate can push the amount due below zero
        let mut register = Register::new();
        register.add_item(NewLineItem::new("A", Money::from_cents(100)));
        register.set_tax_rate(Percent::from(-200));
        assert_eq!(register.grand_total().cents(), -100);
        assert_eq!(
            register.compute_change(Money::MAX),
            Err(CoreError::Money(MoneyError::Overflow))
        );
    }

    #[test]
    fn test_remove_shifts_later_items() {
        let mut register = grocery_register();
        let removed = register.remove_item(1).unwrap();
        assert_eq!(removed.name, "Bread");
        assert_eq!(register.len(), 2);
        assert_eq!(register.line_items()[1].name, "Eggs");
    }

    #[test]
    fn test_remove_out_of_range_leaves_cart() {
        let mut register = Register::new();
        register.add_item(NewLineItem::new("A", Money::from_cents(100)));
        register.add_item(NewLineItem::new("B", Money::from_cents(200)));
        let before = register.clone();

        let err = register.remove_item(5).unwrap_err();
        assert_eq!(err, RegisterError::IndexOutOfRange { index: 5, len: 2 });
        assert_eq!(register, before);
    }

    #[test]
    fn test_order_fixed_before_percent() {
        let mut register = Register::new();
        register.add_item(NewLineItem::new("A", Money::from_cents(10_000)));
        register.apply_order_fixed_discount(Money::from_cents(1000));
        register.apply_order_percent_discount(Percent::from(10));
        // 10.00 + 10% of 90.00
        assert_eq!(register.order_level_discount().cents(), 1900);
        assert_eq!(register.pre_tax_total().cents(), 8100);
    }

    #[test]
    fn test_order_fixed_capped_to_base() {
        let mut register = Register::new();
        register.add_item(NewLineItem::new("A", Money::from_cents(500)));
        register.apply_order_fixed_discount(Money::from_cents(900));
        assert_eq!(register.order_level_discount().cents(), 500);
        assert!(register.grand_total().is_zero());
    }

    #[test]
    fn test_discount_setters_replace() {
        let mut register = grocery_register();
        register.apply_order_percent_discount(Percent::from(20));
        register.apply_order_percent_discount(Percent::from(10));
        assert_eq!(register.order_percent_discount(), Percent::from(10));

        register.apply_order_fixed_discount(Money::from_cents(100));
        register.apply_order_fixed_discount(Money::from_cents(50));
        assert_eq!(register.order_fixed_discount(), Some(Money::from_cents(50)));
    }

    #[test]
    fn test_clear_discounts() {
        let mut register = grocery_register();
        register.apply_order_fixed_discount(Money::from_cents(100));
        register.clear_discounts();

        assert!(register.order_percent_discount().is_zero());
        assert_eq!(register.order_fixed_discount(), None);
        assert!(register.line_items().iter().all(|i| !i.has_discounts()));
        assert_eq!(register.len(), 3);
        assert_eq!(register.line_items()[0].quantity, 2);
        assert_eq!(register.tax_rate(), Percent::new(dec!(8.25)));
    }

    #[test]
    fn test_clear_items() {
        let mut register = grocery_register();
        register.clear_items();
        assert!(register.is_empty());
        assert!(register.grand_total().is_zero());
    }

    #[test]
    fn test_queries_follow_mutations() {
        let mut register = grocery_register();
        assert_eq!(register.grand_total().cents(), 1290);
        register.set_tax_rate(Percent::zero());
        assert_eq!(register.grand_total().cents(), 1192);
    }

    #[test]
    fn test_totals_snapshot() {
        let totals = grocery_register().totals();
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.grand_total.cents(), 1290);

        let json = serde_json::to_value(&totals).unwrap();
        assert_eq!(json["grand_total"], "12.90");
        assert_eq!(json["tax_rate"], "8.25");
    }
}
