//! CSV format handling for transaction import and page output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvTransaction structure for deserialization
//! - Conversion from CSV records to validated `NewTransaction` inputs
//! - Transaction page serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{LedgerError, NewTransaction, Transaction, TransactionStatus, TransactionType};
use crate::validation::validate_new_transaction;
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Header written by [`write_transactions_csv`]
pub const OUTPUT_HEADER: [&str; 9] = [
    "id",
    "timestamp",
    "type",
    "status",
    "amount",
    "description",
    "source_account",
    "destination_account",
    "bank_reference",
];

/// CSV record structure for deserialization
///
/// Matches the import format with columns:
/// `type, description, amount, source_account, destination_account, status, bank_reference, timestamp`.
/// Everything after `amount` is optional; a missing status means INITIATED
/// and a missing timestamp means "now".
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct CsvTransaction {
    #[serde(rename = "type")]
    pub tx_type: String,
    pub description: String,
    pub amount: String,
    #[serde(default)]
    pub source_account: Option<String>,
    #[serde(default)]
    pub destination_account: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub bank_reference: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Convert a CsvTransaction into a validated, normalized NewTransaction
///
/// This function:
/// - Parses the type and status names (case-insensitive)
/// - Parses the amount into a Decimal
/// - Parses the optional RFC 3339 timestamp
/// - Runs the pre-store validation, which also normalizes the account pair
///
/// # Errors
///
/// The first parse or validation failure.
pub fn convert_csv_record(record: CsvTransaction) -> Result<NewTransaction, LedgerError> {
    let tx_type = TransactionType::from_str(&record.tx_type)?;

    let amount = Decimal::from_str(record.amount.trim())
        .map_err(|_| LedgerError::validation("amount", &format!("'{}' is not a number", record.amount)))?;

    let status = match non_empty(record.status) {
        Some(status) => TransactionStatus::from_str(&status)?,
        None => TransactionStatus::default(),
    };

    let mut transaction = NewTransaction::new(tx_type, record.description, amount).with_status(status);

    if let Some(timestamp) = non_empty(record.timestamp) {
        let parsed = DateTime::parse_from_rfc3339(timestamp.trim()).map_err(|e| {
            LedgerError::validation("timestamp", &format!("'{}': {}", timestamp, e))
        })?;
        transaction = transaction.with_timestamp(parsed.with_timezone(&Utc));
    }

    transaction.source_account = non_empty(record.source_account);
    transaction.destination_account = non_empty(record.destination_account);
    transaction.bank_reference = non_empty(record.bank_reference);

    validate_new_transaction(&mut transaction)?;
    Ok(transaction)
}

/// Write transactions to CSV format in the order given
///
/// # Errors
///
/// `IoError` if the header, a row or the final flush cannot be written.
pub fn write_transactions_csv(
    transactions: &[Transaction],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer.write_record(OUTPUT_HEADER).map_err(|e| LedgerError::IoError {
        message: format!("Failed to write CSV header: {}", e),
    })?;

    for tx in transactions {
        writer
            .write_record([
                tx.id.to_string(),
                tx.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
                tx.tx_type.to_string(),
                tx.status.to_string(),
                tx.amount.to_string(),
                tx.description.clone(),
                tx.source_account.clone().unwrap_or_default(),
                tx.destination_account.clone().unwrap_or_default(),
                tx.bank_reference.clone().unwrap_or_default(),
            ])
            .map_err(|e| LedgerError::IoError {
                message: format!("Failed to write transaction {}: {}", tx.id, e),
            })?;
    }

    writer.flush()?;

    Ok(())
}
