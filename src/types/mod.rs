//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: The transaction entity, its enums and the create/update input
//! - `page`: Pagination envelope for filtered queries
//! - `error`: Error types for the ledger

pub mod error;
pub mod page;
pub mod transaction;

pub use error::LedgerError;
pub use page::TransactionPage;
pub use transaction::{
    NewTransaction, Transaction, TransactionId, TransactionStatus, TransactionType,
};
