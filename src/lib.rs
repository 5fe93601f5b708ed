//! Bank Transaction Ledger Library
//! # Overview
//!
//! An in-memory, thread-safe ledger of bank transactions. Every transaction
//! receives a 63-bit, time-ordered id from a Snowflake-style generator, is
//! held in a concurrent store, and can be fetched, replaced, deleted, or
//! queried page by page with optional type, status and id-search filters.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Transaction, NewTransaction, TransactionPage, LedgerError)
//! - [`core`] - Ledger components:
//!   - [`core::id_generator`] - Unique, time-ordered id issuance
//!   - [`core::transaction_store`] - Concurrent store (source of truth)
//!   - [`core::cached_store`] - Read-through cache decorator
//!   - [`core::filter`] - Filter predicate, ordering and pagination
//!   - [`core::ledger`] - Façade composing the above
//! - [`validation`] - Pre-store field checks for untrusted input
//! - [`io`] - CSV import and page output
//! - [`strategy`] - Sync and async import pipelines
//! - [`cli`] - CLI arguments parsing
//!
//! # Id Layout
//!
//! ```text
//! | 41 bits: ms since 2024-01-01 | 5 bits: datacenter | 5 bits: worker | 12 bits: sequence |
//! ```
//!
//! # Example
//!
//! ```
//! use bank_ledger::{Ledger, LedgerConfig, NewTransaction, TransactionFilter, TransactionType};
//! use rust_decimal::Decimal;
//!
//! let ledger = Ledger::new(&LedgerConfig::default()).unwrap();
//! let deposit = NewTransaction::new(TransactionType::Deposit, "Salary", Decimal::new(250000, 2))
//!     .with_destination("ACCT87654321");
//! let created = ledger.create(deposit).unwrap();
//!
//! assert_eq!(ledger.get(created.id).unwrap(), created);
//! assert_eq!(ledger.page(&TransactionFilter::new(), 0, 10).total_elements, 1);
//! ```

pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;
pub mod validation;

pub use core::{IdGenerator, Ledger, LedgerConfig, TransactionFilter, TransactionStore};
pub use io::write_transactions_csv;
pub use types::{
    LedgerError, NewTransaction, Transaction, TransactionId, TransactionPage, TransactionStatus,
    TransactionType,
};
