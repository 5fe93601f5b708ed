//! Transaction-related types for the bank ledger
//!
//! This module defines the transaction entity, its closed type and status
//! enumerations, and the `NewTransaction` input used by create and update.

use super::error::LedgerError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transaction identifier
///
/// A 63-bit Snowflake-style value issued by the id generator. Always non-negative.
pub type TransactionId = i64;

/// Kind of money movement a transaction represents
///
/// The kind decides which account fields are populated:
/// deposits credit a destination, withdrawals debit a source,
/// transfers move funds between both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Credit funds to a destination account
    Deposit,

    /// Debit funds from a source account
    Withdrawal,

    /// Move funds from a source account to a destination account
    Transfer,
}

impl TransactionType {
    pub const ALL: [TransactionType; 3] = [
        TransactionType::Deposit,
        TransactionType::Withdrawal,
        TransactionType::Transfer,
    ];

    /// Upper-case wire name (`DEPOSIT`, `WITHDRAWAL`, `TRANSFER`)
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Withdrawal => "WITHDRAWAL",
            TransactionType::Transfer => "TRANSFER",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEPOSIT" => Ok(TransactionType::Deposit),
            "WITHDRAWAL" => Ok(TransactionType::Withdrawal),
            "TRANSFER" => Ok(TransactionType::Transfer),
            _ => Err(LedgerError::invalid_transaction_type(s)),
        }
    }
}

/// Processing state of a transaction
///
/// Any status may be written by an update regardless of the previous one;
/// no transition rules are enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Just created in the ledger
    #[default]
    Initiated,

    /// Created but not yet picked up for processing
    Pending,

    /// Being processed by the bank
    Processing,

    /// Completed successfully
    Completed,

    /// Failed during processing
    Failed,

    /// Rejected by policy or validation
    Rejected,

    /// Cancelled by the user or the system
    Cancelled,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 7] = [
        TransactionStatus::Initiated,
        TransactionStatus::Pending,
        TransactionStatus::Processing,
        TransactionStatus::Completed,
        TransactionStatus::Failed,
        TransactionStatus::Rejected,
        TransactionStatus::Cancelled,
    ];

    /// Upper-case wire name (`INITIATED`, `PENDING`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Initiated => "INITIATED",
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Processing => "PROCESSING",
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Rejected => "REJECTED",
            TransactionStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        TransactionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| LedgerError::invalid_status(s))
    }
}

/// A transaction as stored in the ledger
///
/// The `id` is assigned exactly once, at creation, and never changes.
/// Every other field is replaced wholesale by an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier issued by the id generator
    pub id: TransactionId,

    /// Free-form description (at most 255 characters)
    pub description: String,

    /// Positive amount moved by the transaction
    pub amount: Decimal,

    /// Deposit, withdrawal or transfer
    #[serde(rename = "type")]
    pub tx_type: TransactionType,

    /// Current processing status
    pub status: TransactionStatus,

    /// Instant the transaction was created
    pub timestamp: DateTime<Utc>,

    /// Debited account, present for withdrawals and transfers
    pub source_account: Option<String>,

    /// Credited account, present for deposits and transfers
    pub destination_account: Option<String>,

    /// Bank-generated reference
    pub bank_reference: Option<String>,

    /// When the bank processed the transaction
    pub processing_date: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Materialize a stored transaction from its input under the given id
    pub fn from_new(id: TransactionId, new: NewTransaction) -> Self {
        Transaction {
            id,
            description: new.description,
            amount: new.amount,
            tx_type: new.tx_type,
            status: new.status,
            timestamp: new.timestamp,
            source_account: new.source_account,
            destination_account: new.destination_account,
            bank_reference: new.bank_reference,
            processing_date: new.processing_date,
        }
    }
}

/// Input for creating or replacing a transaction
///
/// Carries every field of [`Transaction`] except the id, which only the
/// ledger assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub description: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub status: TransactionStatus,
    pub timestamp: DateTime<Utc>,
    pub source_account: Option<String>,
    pub destination_account: Option<String>,
    pub bank_reference: Option<String>,
    pub processing_date: Option<DateTime<Utc>>,
}

impl NewTransaction {
    /// Create an input stamped with the current time and `INITIATED` status
    pub fn new(tx_type: TransactionType, description: impl Into<String>, amount: Decimal) -> Self {
        NewTransaction {
            description: description.into(),
            amount,
            tx_type,
            status: TransactionStatus::default(),
            timestamp: Utc::now(),
            source_account: None,
            destination_account: None,
            bank_reference: None,
            processing_date: None,
        }
    }

    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_source(mut self, account: impl Into<String>) -> Self {
        self.source_account = Some(account.into());
        self
    }

    pub fn with_destination(mut self, account: impl Into<String>) -> Self {
        self.destination_account = Some(account.into());
        self
    }

    pub fn with_bank_reference(mut self, reference: impl Into<String>) -> Self {
        self.bank_reference = Some(reference.into());
        self
    }

    pub fn with_processing_date(mut self, date: DateTime<Utc>) -> Self {
        self.processing_date = Some(date);
        self
    }
}
