//! Thread-safe in-memory transaction store
//!
//! This module provides the `InMemoryTransactionStore`, the single source of
//! truth for transactions. It holds every record in process memory only;
//! nothing survives a restart.
//!
//! # Design
//!
//! The store uses `DashMap` (a concurrent HashMap) keyed by transaction id.
//! Operations on one id take that id's shard lock, so they are atomic and
//! linearizable with respect to each other. Operations on ids in different
//! shards proceed in parallel.
//!
//! # Bulk Reads
//!
//! `list`, `find_page` and `count` walk the map shard by shard. Each entry is
//! read under its shard lock, but the walk as a whole is not a point-in-time
//! snapshot: a write racing a scan may or may not show up in it, and two
//! back-to-back scans can disagree on totals.

use crate::core::filter::{paginate, TransactionFilter};
use crate::core::traits::TransactionStore;
use crate::types::{LedgerError, NewTransaction, Transaction, TransactionId};
use dashmap::DashMap;

/// Concurrent transaction store backed by `DashMap`
///
/// # Thread Safety
///
/// All methods take `&self` and are safe to call from many threads at once:
/// - Concurrent reads of different transactions don't block each other
/// - Concurrent writes to different transactions don't block each other
/// - Operations on the same transaction are serialized
#[derive(Debug, Default)]
pub struct InMemoryTransactionStore {
    /// Current value of every transaction by id
    transactions: DashMap<TransactionId, Transaction>,
}

impl InMemoryTransactionStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            transactions: DashMap::new(),
        }
    }

    /// Number of stored transactions
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Clone out every transaction accepted by the filter
    fn collect_matching(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        let predicate = filter.predicate();
        self.transactions
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl TransactionStore for InMemoryTransactionStore {
    fn insert(&self, transaction: Transaction) -> Transaction {
        self.transactions
            .insert(transaction.id, transaction.clone());
        transaction
    }

    fn get(&self, id: TransactionId) -> Result<Transaction, LedgerError> {
        self.transactions
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| LedgerError::transaction_not_found(id, "get"))
    }

    fn update(
        &self,
        id: TransactionId,
        transaction: NewTransaction,
    ) -> Result<Transaction, LedgerError> {
        // Existence check and replacement happen under the same shard lock
        match self.transactions.get_mut(&id) {
            Some(mut entry) => {
                let updated = Transaction::from_new(id, transaction);
                *entry.value_mut() = updated.clone();
                Ok(updated)
            }
            None => Err(LedgerError::transaction_not_found(id, "update")),
        }
    }

    fn delete(&self, id: TransactionId) -> Result<(), LedgerError> {
        self.transactions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| LedgerError::transaction_not_found(id, "delete"))
    }

    fn list(&self) -> Vec<Transaction> {
        self.transactions
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    fn find_page(&self, filter: &TransactionFilter, page: usize, size: usize) -> Vec<Transaction> {
        paginate(self.collect_matching(filter), page, size)
    }

    fn count(&self, filter: &TransactionFilter) -> usize {
        let predicate = filter.predicate();
        self.transactions
            .iter()
            .filter(|entry| predicate(entry.value()))
            .count()
    }
}
