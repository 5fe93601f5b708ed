//! Asynchronous CSV reader with batch interface
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of NewTransactions
//!                  ↓
//!           csv_format module
//!           (CsvTransaction, convert_csv_record)
//! ```
//!
//! Rows that fail to parse or validate are logged and skipped; the reader
//! keeps a running count of them for the import summary.

use crate::io::csv_format::{convert_csv_record, CsvTransaction};
use crate::types::NewTransaction;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous CSV reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    line_num: u64,
    rejected: usize,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            line_num: 1,
            rejected: 0,
        }
    }

    /// Read up to `batch_size` valid transactions
    ///
    /// Returns an empty vector once the input is exhausted.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<NewTransaction> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvTransaction>();

        while batch.len() < batch_size {
            let row = match records.next().await {
                Some(row) => row,
                None => break,
            };
            self.line_num += 1;

            match row.map_err(|e| e.to_string()).and_then(|csv_record| {
                convert_csv_record(csv_record).map_err(|e| e.to_string())
            }) {
                Ok(transaction) => batch.push(transaction),
                Err(message) => {
                    self.rejected += 1;
                    warn!(line = self.line_num, error = %message, "skipping CSV row");
                }
            }
        }

        batch
    }

    /// Rows skipped so far
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}
