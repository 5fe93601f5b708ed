//! Error types for the bank ledger
//!
//! This module defines all error types that can occur in the ledger core and
//! at its import edge.
//!
//! # Error Categories
//!
//! - **Configuration Errors**: Generator identity out of range (fatal at construction)
//! - **Clock Errors**: Wall clock observed moving backwards (fatal per id request)
//! - **Lookup Errors**: Transaction id absent for get, update or delete (expected)
//! - **Import Errors**: File I/O, CSV parsing, unknown enum names, failed field checks

use super::transaction::TransactionId;
use thiserror::Error;

/// Main error type for the ledger
///
/// The core never retries or swallows these; each is returned to the
/// immediate caller, which decides how to surface it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Generator configured with an out-of-range identity
    ///
    /// Fatal: the generator is never constructed.
    #[error("Invalid {field} {value}: must be between 0 and {max}")]
    InvalidConfiguration {
        /// Name of the offending setting
        field: String,
        /// Value that was supplied
        value: u64,
        /// Largest accepted value
        max: u64,
    },

    /// System clock moved backwards since the last issued id
    ///
    /// Fatal for the call: no id is produced. Requires operator attention.
    #[error("Clock moved backwards. Refusing to generate id for {} milliseconds", last_timestamp.saturating_sub(*now))]
    ClockMovedBackwards {
        /// Timestamp (Unix ms) of the last issued id
        last_timestamp: u64,
        /// Timestamp (Unix ms) the clock reported
        now: u64,
    },

    /// No transaction with the requested id
    ///
    /// Recoverable: a normal negative result.
    #[error("Transaction {id} not found for {operation}")]
    TransactionNotFound {
        /// Requested id
        id: TransactionId,
        /// Operation that failed
        operation: String,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// The malformed record is skipped and importing continues.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Unknown transaction type name
    #[error("Invalid transaction type '{tx_type}'")]
    InvalidTransactionType {
        /// The unrecognized name
        tx_type: String,
    },

    /// Unknown transaction status name
    #[error("Invalid transaction status '{status}'")]
    InvalidStatus {
        /// The unrecognized name
        status: String,
    },

    /// A field failed the pre-store checks
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the rejected field
        field: String,
        /// Why it was rejected
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl LedgerError {
    /// Create an InvalidConfiguration error
    pub fn invalid_configuration(field: &str, value: u64, max: u64) -> Self {
        LedgerError::InvalidConfiguration {
            field: field.to_string(),
            value,
            max,
        }
    }

    /// Create a ClockMovedBackwards error
    pub fn clock_moved_backwards(last_timestamp: u64, now: u64) -> Self {
        LedgerError::ClockMovedBackwards {
            last_timestamp,
            now,
        }
    }

    /// Create a TransactionNotFound error
    pub fn transaction_not_found(id: TransactionId, operation: &str) -> Self {
        LedgerError::TransactionNotFound {
            id,
            operation: operation.to_string(),
        }
    }

    /// Create an InvalidTransactionType error
    pub fn invalid_transaction_type(tx_type: &str) -> Self {
        LedgerError::InvalidTransactionType {
            tx_type: tx_type.to_string(),
        }
    }

    /// Create an InvalidStatus error
    pub fn invalid_status(status: &str) -> Self {
        LedgerError::InvalidStatus {
            status: status.to_string(),
        }
    }

    /// Create a Validation error
    pub fn validation(field: &str, message: &str) -> Self {
        LedgerError::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Whether this error means the requested transaction does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::TransactionNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::invalid_configuration(
        LedgerError::InvalidConfiguration { field: "worker_id".to_string(), value: 32, max: 31 },
        "Invalid worker_id 32: must be between 0 and 31"
    )]
    #[case::clock_moved_backwards(
        LedgerError::ClockMovedBackwards { last_timestamp: 1_704_067_200_500, now: 1_704_067_200_495 },
        "Clock moved backwards. Refusing to generate id for 5 milliseconds"
    )]
    #[case::transaction_not_found(
        LedgerError::TransactionNotFound { id: 999, operation: "get".to_string() },
        "Transaction 999 not found for get"
    )]
    #[case::file_not_found(
        LedgerError::FileNotFound { path: "test.csv".to_string() },
        "File not found: test.csv"
    )]
    #[case::io_error(
        LedgerError::IoError { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::parse_error_with_line(
        LedgerError::ParseError { line: Some(42), message: "Invalid field".to_string() },
        "CSV parse error at line 42: Invalid field"
    )]
    #[case::parse_error_without_line(
        LedgerError::ParseError { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    #[case::invalid_transaction_type(
        LedgerError::InvalidTransactionType { tx_type: "refund".to_string() },
        "Invalid transaction type 'refund'"
    )]
    #[case::invalid_status(
        LedgerError::InvalidStatus { status: "settled".to_string() },
        "Invalid transaction status 'settled'"
    )]
    #[case::validation(
        LedgerError::Validation { field: "amount".to_string(), message: "must be positive".to_string() },
        "Invalid amount: must be positive"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::invalid_configuration(
        LedgerError::invalid_configuration("datacenter_id", 40, 31),
        LedgerError::InvalidConfiguration { field: "datacenter_id".to_string(), value: 40, max: 31 }
    )]
    #[case::clock_moved_backwards(
        LedgerError::clock_moved_backwards(10, 5),
        LedgerError::ClockMovedBackwards { last_timestamp: 10, now: 5 }
    )]
    #[case::transaction_not_found(
        LedgerError::transaction_not_found(7, "delete"),
        LedgerError::TransactionNotFound { id: 7, operation: "delete".to_string() }
    )]
    #[case::validation(
        LedgerError::validation("description", "is required"),
        LedgerError::Validation { field: "description".to_string(), message: "is required".to_string() }
    )]
    fn test_helper_functions(#[case] result: LedgerError, #[case] expected: LedgerError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_is_not_found() {
        assert!(LedgerError::transaction_not_found(1, "get").is_not_found());
        assert!(!LedgerError::clock_moved_backwards(2, 1).is_not_found());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: LedgerError = io_error.into();
        assert!(matches!(error, LedgerError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
