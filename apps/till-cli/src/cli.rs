//! Command-line flags.

use std::path::PathBuf;

use clap::Parser;
use till_core::Percent;

/// Cash register: price a cart, take cash, save a receipt.
///
/// Without `--demo`, starts an interactive session on stdin/stdout.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "till", version, about)]
pub struct Cli {
    /// Run the scripted demo sale and save a sample receipt
    #[arg(long)]
    pub demo: bool,

    /// Directory receipts are written to (overrides TILL_RECEIPTS_DIR)
    #[arg(long, value_name = "DIR")]
    pub receipts_dir: Option<PathBuf>,

    /// Starting tax rate in percent, e.g. 8.25 (overrides TILL_TAX_RATE)
    #[arg(long, value_name = "PERCENT")]
    pub tax_rate: Option<Percent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["till", "--demo", "--receipts-dir", "out", "--tax-rate", "8.25"]);
        assert!(cli.demo);
        assert_eq!(cli.receipts_dir, Some(PathBuf::from("out")));
        assert_eq!(cli.tax_rate.map(|p| p.to_string()), Some("8.25".to_string()));
    }

    #[test]
    fn test_rejects_bad_tax_rate() {
        assert!(Cli::try_parse_from(["till", "--tax-rate", "high"]).is_err());
    }
}
