//! Core storage trait
//!
//! Both the plain in-memory store and the caching decorator implement
//! [`TransactionStore`], so the ledger can be assembled with or without a
//! cache and callers cannot tell the difference.

use crate::core::filter::TransactionFilter;
use crate::types::{LedgerError, NewTransaction, Transaction, TransactionId};

/// Trait for storing, mutating and querying transactions
///
/// Point operations (`insert`, `get`, `update`, `delete`) are atomic per id.
/// Bulk operations (`list`, `find_page`, `count`) see each entry in some
/// valid state but are not linearized against concurrent point writes.
pub trait TransactionStore: Send + Sync {
    /// Store a transaction under its own id
    ///
    /// Ids come from the generator, so an existing entry is never replaced.
    fn insert(&self, transaction: Transaction) -> Transaction;

    /// Get the current value for an id
    fn get(&self, id: TransactionId) -> Result<Transaction, LedgerError>;

    /// Replace every field of an existing transaction, keeping its id
    fn update(&self, id: TransactionId, transaction: NewTransaction)
        -> Result<Transaction, LedgerError>;

    /// Remove a transaction
    fn delete(&self, id: TransactionId) -> Result<(), LedgerError>;

    /// Snapshot of every stored transaction, in no particular order
    fn list(&self) -> Vec<Transaction>;

    /// One page of matching transactions, most recent first
    fn find_page(&self, filter: &TransactionFilter, page: usize, size: usize) -> Vec<Transaction>;

    /// Number of matching transactions
    fn count(&self, filter: &TransactionFilter) -> usize;
}
