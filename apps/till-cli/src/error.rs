//! # CLI Error Type
//!
//! Unified error type for everything the command-line register does.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the REPL                               │
//! │                                                                         │
//! │  "remove 9"                                                             │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  Register::remove_item ── RegisterError ──► CliError::Core              │
//! │      │                                            │                     │
//! │      ▼                                            ▼                     │
//! │  "Removed."                           "Error: Line item index ..."      │
//! │                                                   │                     │
//! │                                                   ▼                     │
//! │                                         loop continues, cart intact     │
//! │                                                                         │
//! │  Only I/O failures on the terminal itself end the session.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use till_core::{CoreError, MoneyError, RegisterError};

use crate::config::ConfigError;

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Pricing errors from till-core (bad amount, bad index, short cash).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Quantity prompt answer is not a whole number.
    #[error("Invalid quantity: '{0}'")]
    InvalidQuantity(String),

    /// `remove` argument is not a non-negative integer.
    #[error("Invalid line index: '{0}'")]
    InvalidIndex(String),

    /// Input ended while a prompt was waiting for an answer.
    #[error("Unexpected end of input")]
    UnexpectedEof,

    /// Receipt file or directory could not be written.
    #[error("Could not save receipt to {}: {source}", .path.display())]
    ReceiptWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Terminal read/write failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CliError {
    /// True for errors that should end the session rather than be shown
    /// to the cashier.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CliError::Io(_) | CliError::Config(_))
    }
}

impl From<MoneyError> for CliError {
    fn from(err: MoneyError) -> Self {
        CliError::Core(err.into())
    }
}

impl From<RegisterError> for CliError {
    fn from(err: RegisterError) -> Self {
        CliError::Core(err.into())
    }
}

/// Convenience type alias for Results with CliError.
pub type CliResult<T> = Result<T, CliError>;

// =============================================================================
// Unit Tests
// =============================================================================
