//! # Receipt Store
//!
//! Writes rendered receipts as UTF-8 text files.
//!
//! ```text
//! <receipts_dir>/
//! ├── receipt-20261019-140312.txt
//! └── receipt-20261019-141501.txt
//! ```
//!
//! One file per checkout. Two checkouts in the same second share a name and
//! the later one wins.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use till_core::receipt_file_name;
use tracing::info;

use crate::error::{CliError, CliResult};

/// A directory receipts are saved into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptStore {
    dir: PathBuf,
}

impl ReceiptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ReceiptStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Saves `text` as the receipt for `at`, creating the directory if needed.
    ///
    /// ## Returns
    /// The path of the written file.
    pub fn save(&self, text: &str, at: NaiveDateTime) -> CliResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|source| CliError::ReceiptWrite {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(receipt_file_name(at));
        fs::write(&path, text).map_err(|source| CliError::ReceiptWrite {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), bytes = text.len(), "Receipt saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir()
            .join(format!("till-receipts-{}", uuid::Uuid::new_v4()))
            .join("nested")
    }

    fn at(sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .and_then(|d| d.and_hms_opt(9, 5, sec))
            .unwrap()
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = scratch_dir();
        let store = ReceiptStore::new(&dir);

        let path = store.save("RECEIPT\nhello", at(7)).unwrap();

        assert_eq!(path, dir.join("receipt-20261019-090507.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "RECEIPT\nhello");
        let _ = fs::remove_dir_all(dir.parent().unwrap());
    }

    #[test]
    fn test_same_second_overwrites() {
        let dir = scratch_dir();
        let store = ReceiptStore::new(&dir);

        store.save("first", at(1)).unwrap();
        let path = store.save("second", at(1)).unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "second");
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);
        let _ = fs::remove_dir_all(dir.parent().unwrap());
    }

    #[test]
    fn test_unwritable_directory_reports_path() {
        let blocker = std::env::temp_dir().join(format!("till-file-{}", uuid::Uuid::new_v4()));
        fs::write(&blocker, "not a dir").unwrap();
        let store = ReceiptStore::new(blocker.join("receipts"));

        let err = store.save("x", at(0)).unwrap_err();
        assert!(matches!(err, CliError::ReceiptWrite { .. }));
        let _ = fs::remove_file(blocker);
    }
}
