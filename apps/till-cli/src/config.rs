//! # Configuration
//!
//! Resolves runtime settings once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--receipts-dir`, `--tax-rate`)
//! 2. Environment variables (`TILL_RECEIPTS_DIR`, `TILL_TAX_RATE`, `RUST_LOG`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after startup.

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use till_core::Percent;

use crate::cli::Cli;

pub const ENV_RECEIPTS_DIR: &str = "TILL_RECEIPTS_DIR";
pub const ENV_TAX_RATE: &str = "TILL_TAX_RATE";
pub const ENV_LOG_FILTER: &str = "RUST_LOG";

/// Default tracing filter; quiet so prompts stay readable.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TillConfig {
    /// Where receipt text files are written. Created on first save.
    pub receipts_dir: PathBuf,

    /// Tax rate the interactive register starts with.
    pub default_tax_rate: Percent,

    /// `tracing_subscriber::EnvFilter` directive string.
    pub log_filter: String,
}

impl Default for TillConfig {
    /// ## Default Values
    /// - Receipts: `<platform data dir>/receipts`, or `./receipts`
    /// - Tax: 0%
    /// - Logging: warnings only
    fn default() -> Self {
        TillConfig {
            receipts_dir: default_receipts_dir(),
            default_tax_rate: Percent::zero(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl TillConfig {
    /// Loads configuration from the process environment and `cli` flags.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let config = TillConfig::from_lookup(|key| env::var(key).ok())?;
        Ok(config.with_cli(cli))
    }

    /// Builds configuration from defaults plus whatever `lookup` returns.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = TillConfig::default();

        if let Some(dir) = get(ENV_RECEIPTS_DIR) {
            config.receipts_dir = PathBuf::from(dir);
        }

        if let Some(rate) = get(ENV_TAX_RATE) {
            config.default_tax_rate = rate
                .parse()
                .map_err(|_| ConfigError::InvalidValue(ENV_TAX_RATE.to_string()))?;
        }

        if let Some(filter) = get(ENV_LOG_FILTER) {
            config.log_filter = filter;
        }

        Ok(config)
    }

    /// Applies command-line flags over the current values.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(dir) = &cli.receipts_dir {
            self.receipts_dir = dir.clone();
        }
        if let Some(rate) = cli.tax_rate {
            self.default_tax_rate = rate;
        }
        self
    }
}

/// Platform data directory + `receipts`.
///
/// - **Linux**: `~/.local/share/till/receipts`
/// - **macOS**: `~/Library/Application Support/com.till.till/receipts`
/// - **Windows**: `%APPDATA%\till\till\data\receipts`
fn default_receipts_dir() -> PathBuf {
    ProjectDirs::from("com", "till", "till")
        .map(|dirs| dirs.data_dir().join("receipts"))
        .unwrap_or_else(|| PathBuf::from("receipts"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = TillConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.default_tax_rate.is_zero());
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert!(config.receipts_dir.ends_with("receipts"));
    }

    #[test]
    fn test_env_overrides() {
        let config = TillConfig::from_lookup(lookup(&[
            (ENV_RECEIPTS_DIR, "/tmp/till-receipts"),
            (ENV_TAX_RATE, "8.25"),
            (ENV_LOG_FILTER, "till_cli=debug"),
        ]))
        .unwrap();

        assert_eq!(config.receipts_dir, PathBuf::from("/tmp/till-receipts"));
        assert_eq!(config.default_tax_rate.to_string(), "8.25");
        assert_eq!(config.log_filter, "till_cli=debug");
    }

    #[test]
    fn test_blank_env_ignored() {
        let config = TillConfig::from_lookup(lookup(&[(ENV_TAX_RATE, "  ")])).unwrap();
        assert!(config.default_tax_rate.is_zero());
    }

    #[test]
    fn test_invalid_tax_rate() {
        let err = TillConfig::from_lookup(lookup(&[(ENV_TAX_RATE, "lots")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for TILL_TAX_RATE");
    }

    #[test]
    fn test_flags_beat_env() {
        let config = TillConfig::from_lookup(lookup(&[(ENV_TAX_RATE, "5")])).unwrap();
        let cli = Cli {
            demo: false,
            receipts_dir: Some(PathBuf::from("out")),
            tax_rate: Some(Percent::from(7)),
        };
        let config = config.with_cli(&cli);
        assert_eq!(config.default_tax_rate, Percent::from(7));
        assert_eq!(config.receipts_dir, PathBuf::from("out"));
    }
}
