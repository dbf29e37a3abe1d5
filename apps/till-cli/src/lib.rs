//! # Till Command-Line Library
//!
//! Everything `till` does besides pricing: configuration, logging, receipt
//! files, the demo sale and the interactive session.
//!
//! ## Module Organization
//! ```text
//! till_cli/
//! ├── lib.rs       ◄─── You are here (startup & run)
//! ├── cli.rs       ◄─── clap flags
//! ├── config.rs    ◄─── flags > env > defaults
//! ├── receipts.rs  ◄─── receipt-<stamp>.txt files
//! ├── demo.rs      ◄─── scripted sale for --demo
//! ├── repl.rs      ◄─── interactive loop
//! └── error.rs     ◄─── CliError
//! ```

pub mod cli;
pub mod config;
pub mod demo;
pub mod error;
pub mod receipts;
pub mod repl;

use std::io;

use till_core::Register;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub use cli::Cli;
pub use config::TillConfig;
pub use error::{CliError, CliResult};
pub use receipts::ReceiptStore;
pub use repl::Repl;

/// Runs `till` with already-parsed flags.
///
/// ## Startup Sequence
/// 1. Resolve configuration
/// 2. Initialize tracing (stderr)
/// 3. `--demo`: price and save the demo sale, print the path
///    otherwise: interactive session on stdin/stdout
pub fn run(cli: Cli) -> CliResult<()> {
    let config = TillConfig::load(&cli)?;
    init_tracing(&config.log_filter);
    debug!(?config, "Configuration resolved");

    let store = ReceiptStore::new(&config.receipts_dir);

    if cli.demo {
        let path = demo::run_demo(&store)?;
        println!("Demo complete. Saved receipt to: {}", path.display());
        return Ok(());
    }

    let mut register = Register::new();
    register.set_tax_rate(config.default_tax_rate);

    info!(receipts_dir = %store.dir().display(), "Starting interactive session");
    let stdin = io::stdin();
    let mut repl = Repl::new(register, store, stdin.lock(), io::stdout());
    repl.run()
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never interleave with prompts on stdout.
/// `RUST_LOG` (or the configured filter) wins; falls back to `warn`.
fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));

    // Ignore the error if a subscriber is already installed (tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
