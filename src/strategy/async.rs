//! Asynchronous batch import strategy
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     └── per batch: up to max_concurrent_batches tokio tasks
//!             └── Ledger::create for each row of the task's chunk
//! ```
//!
//! Batches are read one after another. Within a batch, rows are split into
//! chunks and created concurrently through a shared `Arc<Ledger>`; the
//! generator still hands out unique ids, but the id order across chunks
//! no longer follows file order.

use crate::core::Ledger;
use crate::io::async_reader::AsyncReader;
use crate::io::open_error;
use crate::strategy::{ImportSummary, ProcessingStrategy};
use crate::types::{LedgerError, NewTransaction};
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{debug, error, info, warn};

/// Configuration for batch processing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of rows per batch
    pub batch_size: usize,
    /// Maximum number of tasks creating records concurrently
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a BatchConfig, replacing zero values with defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch_size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "invalid max_concurrent_batches, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch import strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Create every row of one batch, spread over concurrent tasks
    async fn create_batch(
        &self,
        ledger: &Arc<Ledger>,
        batch: Vec<NewTransaction>,
        summary: &mut ImportSummary,
    ) {
        let chunk_size = batch.len().div_ceil(self.config.max_concurrent_batches).max(1);
        let mut rows = batch.into_iter().peekable();
        let mut tasks = Vec::new();

        while rows.peek().is_some() {
            let chunk: Vec<NewTransaction> = rows.by_ref().take(chunk_size).collect();
            let chunk_len = chunk.len();
            let ledger = Arc::clone(ledger);
            let handle = tokio::spawn(async move {
                let mut created = 0usize;
                let mut failed = 0usize;
                for transaction in chunk {
                    match ledger.create(transaction) {
                        Ok(_) => created += 1,
                        Err(e) => {
                            error!(error = %e, "failed to record transaction");
                            failed += 1;
                        }
                    }
                }
                (created, failed)
            });
            tasks.push((chunk_len, handle));
        }

        for (chunk_len, task) in tasks {
            record_chunk(summary, chunk_len, task.await);
        }
    }
}

/// Fold one task's outcome into the summary. A task that did not finish
/// counts its whole chunk as failed, so `total()` still matches the rows read.
fn record_chunk(
    summary: &mut ImportSummary,
    chunk_len: usize,
    outcome: Result<(usize, usize), JoinError>,
) {
    match outcome {
        Ok((created, failed)) => {
            summary.created += created;
            summary.failed += failed;
        }
        Err(e) => {
            error!(error = ?e, rows = chunk_len, "import task panicked");
            summary.failed += chunk_len;
        }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn import(&self, input_path: &Path, ledger: &Arc<Ledger>) -> Result<ImportSummary, LedgerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| LedgerError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        runtime.block_on(async {
            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| open_error(input_path, e))?;

            // Wrap tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);
            let mut summary = ImportSummary::default();

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }
                debug!(rows = batch.len(), "importing batch");
                self.create_batch(ledger, batch, &mut summary).await;
            }
            summary.rejected = reader.rejected();

            info!(
                path = %input_path.display(),
                created = summary.created,
                rejected = summary.rejected,
                failed = summary.failed,
                "async import finished"
            );
            Ok(summary)
        })
    }
}
