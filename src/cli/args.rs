use crate::core::{LedgerConfig, TransactionFilter};
use crate::strategy::BatchConfig;
use crate::types::{TransactionStatus, TransactionType};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Import bank transactions and query them page by page
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "Import bank transactions from CSV and print one page of them", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing transactions to import
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Import strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Import strategy: 'sync' for one row at a time or 'async' for concurrent batches"
    )]
    pub strategy: StrategyType,

    /// Number of rows per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of rows per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of concurrent import tasks (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of concurrent import tasks (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Worker id embedded in generated ids
    #[arg(long = "worker-id", value_name = "ID", env = "LEDGER_WORKER_ID", default_value_t = 0)]
    pub worker_id: u8,

    /// Datacenter id embedded in generated ids
    #[arg(
        long = "datacenter-id",
        value_name = "ID",
        env = "LEDGER_DATACENTER_ID",
        default_value_t = 0
    )]
    pub datacenter_id: u8,

    /// Disable the read-through cache
    #[arg(long = "no-cache")]
    pub no_cache: bool,

    /// Only show transactions of this type
    #[arg(long = "type", value_name = "TYPE")]
    pub tx_type: Option<TransactionType>,

    /// Only show transactions with this status
    #[arg(long = "status", value_name = "STATUS")]
    pub status: Option<TransactionStatus>,

    /// Only show transactions whose id contains this text
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Zero-based page to print
    #[arg(long = "page", value_name = "N", default_value_t = 0)]
    pub page: usize,

    /// Transactions per page
    #[arg(long = "size", value_name = "N", default_value_t = 10)]
    pub size: usize,
}

/// Available import strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to defaults; zero values are replaced by
    /// `BatchConfig::new` with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    pub fn to_ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            worker_id: self.worker_id,
            datacenter_id: self.datacenter_id,
            cache_enabled: !self.no_cache,
        }
    }

    /// Query filter built from `--type`, `--status` and `--search`
    pub fn to_filter(&self) -> TransactionFilter {
        TransactionFilter {
            tx_type: self.tx_type,
            status: self.status,
            search: self.search.clone(),
        }
    }
}
