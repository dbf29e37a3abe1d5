//! # till-core: Pure Pricing Logic for Till
//!
//! This crate is the **heart** of Till. It holds the whole pricing pipeline
//! as plain computations with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    till-cli (REPL / --demo)                     │   │
//! │  │    add ──► tax ──► orderdisc ──► show ──► checkout ──► file     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │ line_item │  │ register  │  │  receipt  │  │   │
//! │  │   │   Money   │  │ LineItem  │  │ Register  │  │   text    │  │   │
//! │  │   │  Percent  │  │ discounts │  │  totals   │  │ rendering │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO FILES • NO STDIN • NO LOGGING • DETERMINISTIC             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Cent-quantized Money type (decimal, never floating point)
//! - [`types`] - Percent
//! - [`line_item`] - One cart entry and its discounts
//! - [`register`] - Cart aggregate: order discounts, tax, change
//! - [`receipt`] - Receipt text
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{Money, NewLineItem, Percent, Register};
//!
//! let mut register = Register::new();
//! register.set_tax_rate("8.25".parse::<Percent>().unwrap());
//! register.add_item(NewLineItem::new("Milk", "3.49".parse().unwrap()).quantity(2));
//! register.add_item(NewLineItem::new("Bread", "2.29".parse().unwrap()));
//! register.add_item(
//!     NewLineItem::new("Eggs", "4.19".parse().unwrap()).percent_discount(Percent::from(5)),
//! );
//! register.apply_order_percent_discount(Percent::from(10));
//!
//! assert_eq!(register.grand_total().to_string(), "$12.90");
//! let change = register.compute_change(Money::from_cents(2000)).unwrap();
//! assert_eq!(change.to_string(), "$7.10");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod line_item;
pub mod money;
pub mod receipt;
pub mod register;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, MoneyError, RegisterError};
pub use line_item::LineItem;
pub use money::{Money, MoneyValue, Multiplier};
pub use receipt::{generate_receipt_text, receipt_file_name, render_receipt};
pub use register::{NewLineItem, Register, RegisterTotals};
pub use types::Percent;
