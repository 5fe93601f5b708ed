//! Synchronous import strategy
//!
//! Single-threaded pipeline: `SyncReader` streams validated rows one at a
//! time and each is recorded with `Ledger::create` in file order. Ids are
//! therefore strictly increasing in file order.

use crate::core::Ledger;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{ImportSummary, ProcessingStrategy};
use crate::types::LedgerError;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Synchronous import strategy
///
/// # Examples
///
/// ```no_run
/// use bank_ledger::core::{Ledger, LedgerConfig};
/// use bank_ledger::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::sync::Arc;
///
/// let ledger = Arc::new(Ledger::new(&LedgerConfig::default()).unwrap());
/// let summary = SyncProcessingStrategy
///     .import(Path::new("transactions.csv"), &ledger)
///     .expect("Import failed");
/// println!("Created {} transactions", summary.created);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    fn import(&self, input_path: &Path, ledger: &Arc<Ledger>) -> Result<ImportSummary, LedgerError> {
        let reader = SyncReader::new(input_path)?;
        let mut summary = ImportSummary::default();

        for result in reader {
            match result {
                Ok(transaction) => match ledger.create(transaction) {
                    Ok(_) => summary.created += 1,
                    Err(e) => {
                        error!(error = %e, "failed to record transaction");
                        summary.failed += 1;
                    }
                },
                Err(e) => {
                    warn!(error = %e, "skipping CSV row");
                    summary.rejected += 1;
                }
            }
        }

        info!(
            path = %input_path.display(),
            created = summary.created,
            rejected = summary.rejected,
            failed = summary.failed,
            "sync import finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LedgerConfig, TransactionFilter};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn ledger() -> Arc<Ledger> {
        Arc::new(Ledger::new(&LedgerConfig::default()).unwrap())
    }

    #[test]
    fn test_imports_rows_in_file_order() {
        let file = create_temp_csv(
            "type,description,amount,source_account,destination_account\n\
             deposit,First,10,,ACCT87654321\n\
             withdrawal,Second,20,ACCT12345678,\n\
             transfer,Third,30,ACCT12345678,ACCT87654321\n",
        );
        let ledger = ledger();

        let summary = SyncProcessingStrategy.import(file.path(), &ledger).unwrap();

        assert_eq!(summary, ImportSummary { created: 3, rejected: 0, failed: 0 });
        let mut transactions = ledger.list();
        transactions.sort_by_key(|t| t.id);
        let descriptions: Vec<&str> = transactions.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_invalid_rows_are_counted_not_fatal() {
        let file = create_temp_csv(
            "type,description,amount,source_account,destination_account\n\
             deposit,,10,,ACCT87654321\n\
             deposit,Good,10,,ACCT87654321\n\
             transfer,Missing source,30,,ACCT87654321\n",
        );
        let ledger = ledger();

        let summary = SyncProcessingStrategy.import(file.path(), &ledger).unwrap();

        assert_eq!(summary.created, 1);
        assert_eq!(summary.rejected, 2);
        assert_eq!(ledger.count(&TransactionFilter::new()), 1);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = SyncProcessingStrategy.import(Path::new("nonexistent.csv"), &ledger());

        assert!(matches!(result, Err(LedgerError::FileNotFound { .. })));
    }
}
