//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over transaction inputs from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<NewTransaction, LedgerError>` for each CSV row:
//!
//! ```no_run
//! use bank_ledger::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("transactions.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(transaction) => println!("Importing: {:?}", transaction),
//!         Err(e) => eprintln!("Skipping row: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Malformed or invalid rows are yielded as `ParseError` with the file line
//!   number, and iteration continues with the next row

use crate::io::csv_format::{convert_csv_record, CsvTransaction};
use crate::io::open_error;
use crate::types::{LedgerError, NewTransaction};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
///
/// Reads one record at a time; memory use does not grow with file size.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl SyncReader {
    /// Open a CSV file for streaming iteration
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (trailing optional columns may be omitted)
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Errors
    ///
    /// `FileNotFound` if the path does not exist, `IoError` for any other
    /// failure to open it.
    pub fn new(path: &Path) -> Result<Self, LedgerError> {
        let file = File::open(path).map_err(|e| open_error(path, e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 1,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<NewTransaction, LedgerError>;

    /// Next row, or `None` at end of file
    ///
    /// Line numbers count the header as line 1.
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvTransaction>();
        let row = deserializer.next()?;
        self.line_num += 1;
        let line = Some(self.line_num);

        Some(match row {
            Ok(csv_record) => convert_csv_record(csv_record).map_err(|e| LedgerError::ParseError {
                line,
                message: e.to_string(),
            }),
            Err(e) => Err(LedgerError::ParseError {
                line,
                message: e.to_string(),
            }),
        })
    }
}
