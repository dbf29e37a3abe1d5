//! # Receipt Rendering
//!
//! Turns a register snapshot plus tendered cash into receipt text.
//!
//! ## Layout
//! ```text
//! RECEIPT
//! Date: 2026-10-19T14:03:12
//! ----------------------------------------
//! Items:
//!  1. Milk x2 @ $3.49
//!     Subtotal: $6.98  Discount: $0.00  Total: $6.98
//!  2. Eggs x1 @ $4.19
//!     Line percent discount: 5%
//!     Subtotal: $4.19  Discount: $0.21  Total: $3.98
//! ----------------------------------------
//! Subtotal: ...          (totals block)
//! Cash tendered: $20.00
//! Change: $7.10
//! ----------------------------------------
//! Thank you for your purchase!
//! ```
//!
//! [`render_receipt`] is deterministic given a timestamp; the file name and
//! the write itself belong to the caller.

use chrono::{Local, NaiveDateTime};

use crate::money::Money;
use crate::register::Register;

/// Width of the separator rule.
pub const RULE_WIDTH: usize = 40;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const FILE_STAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Renders the receipt stamped with the local time right now.
pub fn generate_receipt_text(register: &Register, cash_tendered: Money, change_due: Money) -> String {
    render_receipt(register, cash_tendered, change_due, Local::now().naive_local())
}

/// Renders the receipt for `register` as of `issued_at`.
///
/// Lines are joined with `\n`; there is no trailing newline.
///
/// ## Panics
/// When the register is beyond Money's range. A register that
/// [`Register::try_totals`] accepts always renders.
pub fn render_receipt(
    register: &Register,
    cash_tendered: Money,
    change_due: Money,
    issued_at: NaiveDateTime,
) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut lines: Vec<String> = vec![
        "RECEIPT".to_string(),
        format!("Date: {}", issued_at.format(TIMESTAMP_FORMAT)),
        rule.clone(),
        "Items:".to_string(),
    ];

    for (idx, item) in register.line_items().iter().enumerate() {
        lines.push(format!(
            "{:>2}. {} x{} @ {}",
            idx + 1,
            item.name,
            item.quantity,
            item.unit_price
        ));
        if !item.percent_discount.is_zero() {
            lines.push(format!("    Line percent discount: {}%", item.percent_discount));
        }
        if let Some(fixed) = item.fixed_discount_per_unit.filter(|m| !m.is_zero()) {
            lines.push(format!("    Line fixed discount: {} each", fixed));
        }
        lines.push(format!(
            "    Subtotal: {}  Discount: {}  Total: {}",
            item.subtotal(),
            item.discount(),
            item.total()
        ));
    }

    let totals = register.totals();
    lines.push(rule.clone());
    lines.push(format!("Subtotal: {}", totals.subtotal_before_discounts));
    lines.push(format!("Line discounts: -{}", totals.line_discounts_total));
    lines.push(format!(
        "After line discounts: {}",
        totals.subtotal_after_line_discounts
    ));

    if !totals.order_level_discount.is_zero() {
        lines.push(format!("Order discount: -{}", totals.order_level_discount));
    }

    lines.push(format!("Pre-tax total: {}", totals.pre_tax_total));
    lines.push(format!("Tax ({}%): {}", totals.tax_rate, totals.tax_amount));
    lines.push(format!("Grand total: {}", totals.grand_total));
    lines.push(format!("Cash tendered: {}", cash_tendered));
    lines.push(format!("Change: {}", change_due));
    lines.push(rule);
    lines.push("Thank you for your purchase!".to_string());

    lines.join("\n")
}

/// File name for a receipt saved at `at`: `receipt-YYYYMMDD-HHMMSS.txt`.
pub fn receipt_file_name(at: NaiveDateTime) -> String {
    format!("receipt-{}.txt", at.format(FILE_STAMP_FORMAT))
}

// =============================================================================
// Unit Tests
// =============================================================================
