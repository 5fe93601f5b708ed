//! Bank Ledger CLI
//!
//! Imports transactions from a CSV file into an in-memory ledger, then prints
//! one filtered page of them as CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.csv > page.csv
//! cargo run -- --strategy sync --type deposit --status initiated transactions.csv
//! cargo run -- --worker-id 3 --datacenter-id 1 --page 1 --size 25 transactions.csv
//! RUST_LOG=debug cargo run -- --search 1234 transactions.csv
//! ```
//!
//! Logs go to stderr so stdout stays clean CSV.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid generator identity, file not found, file not readable, etc.)

use bank_ledger::cli::{self, CliArgs, StrategyType};
use bank_ledger::core::Ledger;
use bank_ledger::io::write_transactions_csv;
use bank_ledger::strategy;
use bank_ledger::types::LedgerError;
use std::process;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn run(args: &CliArgs) -> Result<(), LedgerError> {
    let ledger = Arc::new(Ledger::new(&args.to_ledger_config())?);

    let strategy = {
        let config = if args.strategy == StrategyType::Async {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config)
    };
    let summary = strategy.import(&args.input_file, &ledger)?;
    info!(
        created = summary.created,
        rejected = summary.rejected,
        failed = summary.failed,
        "import complete"
    );

    let page = ledger.page(&args.to_filter(), args.page, args.size);
    info!(
        page_number = page.page_number,
        page_size = page.page_size,
        total_elements = page.total_elements,
        total_pages = page.total_pages,
        "query complete"
    );

    let mut output = std::io::stdout().lock();
    write_transactions_csv(&page.content, &mut output)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    if let Err(e) = run(&args) {
        error!(error = %e, "fatal error");
        process::exit(1);
    }
}
