//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── MoneyError      - Unparsable amounts, bad multipliers, overflow   │
//! │  ├── RegisterError   - Bad line index, not enough cash                 │
//! │  └── CoreError       - Either of the above                             │
//! │                                                                         │
//! │  till-cli errors (separate crate)                                      │
//! │  └── CliError        - What the cashier sees (printed, loop goes on)   │
//! │                                                                         │
//! │  Flow: MoneyError/RegisterError → CoreError → CliError → "Error: ..."  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (input text, index, amounts)
//! 3. Errors are raised to the immediate caller, never logged here

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Money Error
// =============================================================================

/// Errors raised while building or scaling a [`Money`] value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Text could not be read as a decimal amount.
    ///
    /// ## When This Occurs
    /// - Cashier types `abc` at the "Unit price:" prompt
    /// - Empty input after stripping `$` and `,`
    #[error("Invalid monetary value: '{0}'")]
    Parse(String),

    /// A float that has no decimal form (NaN, ±infinity).
    #[error("Monetary value must be finite, got {0}")]
    NonFinite(String),

    /// Multiplier is not a usable number.
    #[error("Multiplier must be a finite integer, float, or decimal, got {0}")]
    InvalidMultiplier(String),

    /// Result does not fit in a cent-scaled 96-bit decimal.
    ///
    /// ## When This Occurs
    /// - `1e20` unit price × quantity `10000000000`
    /// - A tax rate large enough to push the tax past [`Money::MAX`]
    #[error("Monetary value out of range")]
    Overflow,
}

// =============================================================================
// Register Error
// =============================================================================

/// Errors raised by [`crate::register::Register`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// Line index is not within `[0, len)`.
    #[error("Line item index {index} out of range (cart has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Cash tendered is strictly less than the grand total.
    ///
    /// ## User Workflow
    /// ```text
    /// Grand total: $12.90
    ///      │
    ///      ▼
    /// Cash tendered: $10.00
    ///      │
    ///      ▼
    /// InsufficientFunds { tendered: $10.00, due: $12.90 }
    ///      │
    ///      ▼
    /// CLI shows: "Error: Insufficient cash tendered: ..."
    /// ```
    #[error("Insufficient cash tendered: {tendered} is less than {due}")]
    InsufficientFunds { tendered: Money, due: Money },
}

// =============================================================================
// Core Error
// =============================================================================

/// Any error produced by till-core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error(transparent)]
    Register(#[from] RegisterError),
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RegisterError::IndexOutOfRange { index: 5, len: 2 };
        assert_eq!(
            err.to_string(),
            "Line item index 5 out of range (cart has 2 items)"
        );

        let err = RegisterError::InsufficientFunds {
            tendered: Money::from_cents(1000),
            due: Money::from_cents(1290),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient cash tendered: $10.00 is less than $12.90"
        );
    }

    #[test]
    fn test_money_error_messages() {
        let err = MoneyError::Parse("abc".to_string());
        assert_eq!(err.to_string(), "Invalid monetary value: 'abc'");
        assert_eq!(MoneyError::Overflow.to_string(), "Monetary value out of range");
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let core_err: CoreError = MoneyError::Parse("x".to_string()).into();
        assert!(matches!(core_err, CoreError::Money(_)));

        let core_err: CoreError = RegisterError::IndexOutOfRange { index: 0, len: 0 }.into();
        assert!(matches!(core_err, CoreError::Register(_)));
        // transparent: message passes through unchanged
        assert_eq!(
            core_err.to_string(),
            "Line item index 0 out of range (cart has 0 items)"
        );
    }
}
