//! # till
//!
//! Entry point for the command-line register. Setup lives in `lib.rs` for
//! testability.

use clap::Parser;
use till_cli::Cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    till_cli::run(Cli::parse())?;
    Ok(())
}
