//! Import strategy module
//!
//! This module defines the Strategy pattern for complete import pipelines,
//! covering both CSV parsing and record creation in the ledger. Different
//! implementations (synchronous, asynchronous batch) are selected at runtime.

use crate::cli::StrategyType;
use crate::core::Ledger;
use crate::types::LedgerError;
use std::path::Path;
use std::sync::Arc;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Outcome counts of one import run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows recorded in the ledger
    pub created: usize,
    /// Rows skipped because they failed to parse or validate
    pub rejected: usize,
    /// Valid rows the ledger refused (id generation failure)
    pub failed: usize,
}

impl ImportSummary {
    /// Number of data rows seen
    pub fn total(&self) -> usize {
        self.created + self.rejected + self.failed
    }
}

/// Import pipeline from a CSV file into a ledger
pub trait ProcessingStrategy: Send + Sync {
    /// Read every row of `input_path` and create a transaction for each valid one
    ///
    /// Row-level problems are logged and counted in the summary; they never
    /// abort the import.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened (file not found, permission denied)
    /// - The async runtime cannot be started
    fn import(&self, input_path: &Path, ledger: &Arc<Ledger>) -> Result<ImportSummary, LedgerError>;
}

/// Create an import strategy for the given type
///
/// `config` is only used by the async strategy; `None` means defaults.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}
