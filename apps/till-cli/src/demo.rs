//! # Demo Sale
//!
//! A scripted checkout used by `till --demo`.
//!
//! ```text
//! Milk   $3.49 × 2
//! Bread  $2.29 × 1
//! Eggs   $4.19 × 1   5% line discount
//! ──────────────────────────────────────
//! 10% order discount, 8.25% tax, $20.00 cash  →  $12.90 due, $7.10 change
//! ```

use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use till_core::{render_receipt, Money, NewLineItem, Percent, Register};
use tracing::debug;

use crate::error::CliResult;
use crate::receipts::ReceiptStore;

/// Cash handed over in the demo sale.
pub const DEMO_CASH_TENDERED: &str = "20.00";

/// Builds the demo cart with amounts entered as text, like a cashier would.
pub fn demo_register() -> CliResult<Register> {
    let mut register = Register::new();
    register.set_tax_rate("8.25".parse::<Percent>()?);

    register.add_item(NewLineItem::new("Milk", "3.49".parse()?).quantity(2));
    register.add_item(NewLineItem::new("Bread", "2.29".parse()?).quantity(1));
    register.add_item(
        NewLineItem::new("Eggs", "4.19".parse()?)
            .quantity(1)
            .percent_discount("5".parse::<Percent>()?),
    );

    register.apply_order_percent_discount("10".parse::<Percent>()?);
    Ok(register)
}

/// Runs the demo sale as of `at` and returns the saved receipt path.
pub fn run_demo_at(store: &ReceiptStore, at: NaiveDateTime) -> CliResult<PathBuf> {
    let register = demo_register()?;

    let cash_tendered: Money = DEMO_CASH_TENDERED.parse()?;
    let change = register.compute_change(cash_tendered)?;
    debug!(grand_total = %register.grand_total(), %change, "Demo sale priced");

    let text = render_receipt(&register, cash_tendered, change, at);
    store.save(&text, at)
}

/// Runs the demo sale now.
pub fn run_demo(store: &ReceiptStore) -> CliResult<PathBuf> {
    run_demo_at(store, Local::now().naive_local())
}
