//! I/O module
//!
//! Handles CSV import and page output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, output serialization)
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{convert_csv_record, write_transactions_csv, CsvTransaction};
pub use sync_reader::SyncReader;

use crate::types::LedgerError;
use std::io::ErrorKind;
use std::path::Path;

/// Map a failure to open an input file onto the ledger error kinds
pub(crate) fn open_error(path: &Path, error: std::io::Error) -> LedgerError {
    match error.kind() {
        ErrorKind::NotFound => LedgerError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => LedgerError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), error),
        },
    }
}
