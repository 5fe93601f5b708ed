//! Read-through cache layered over a transaction store
//!
//! `CachedTransactionStore` wraps any [`TransactionStore`] and implements the
//! same trait, so the ledger composes it explicitly instead of relying on
//! interception.
//!
//! # Invalidation
//!
//! Every cache-touching point operation runs the inner store operation while
//! holding the cache entry lock for that id. Cache writes for an id therefore
//! happen in the same order as the store mutations they mirror, and a reader
//! filling the cache on a miss can never install a value that a concurrent
//! update or delete has already superseded.
//!
//! Locks are always taken cache first, store second; the inner store never
//! reaches back into the cache.
//!
//! Bulk reads (`list`, `find_page`, `count`) go straight to the inner store
//! and neither consult nor populate the cache.

use crate::core::filter::TransactionFilter;
use crate::core::traits::TransactionStore;
use crate::types::{LedgerError, NewTransaction, Transaction, TransactionId};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Caching decorator over a transaction store
#[derive(Debug)]
pub struct CachedTransactionStore<S> {
    inner: S,
    cache: DashMap<TransactionId, Transaction>,
}

impl<S: TransactionStore> CachedTransactionStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }

    /// The wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of ids currently cached
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

impl<S: TransactionStore> TransactionStore for CachedTransactionStore<S> {
    fn insert(&self, transaction: Transaction) -> Transaction {
        match self.cache.entry(transaction.id) {
            Entry::Occupied(mut cached) => {
                let stored = self.inner.insert(transaction);
                cached.insert(stored.clone());
                stored
            }
            Entry::Vacant(slot) => {
                let stored = self.inner.insert(transaction);
                slot.insert(stored.clone());
                stored
            }
        }
    }

    fn get(&self, id: TransactionId) -> Result<Transaction, LedgerError> {
        if let Some(hit) = self.cache.get(&id).map(|entry| entry.value().clone()) {
            return Ok(hit);
        }

        match self.cache.entry(id) {
            // Filled by a racing reader or writer since the fast path missed
            Entry::Occupied(cached) => Ok(cached.get().clone()),
            Entry::Vacant(slot) => {
                let transaction = self.inner.get(id)?;
                slot.insert(transaction.clone());
                Ok(transaction)
            }
        }
    }

    fn update(
        &self,
        id: TransactionId,
        transaction: NewTransaction,
    ) -> Result<Transaction, LedgerError> {
        match self.cache.entry(id) {
            Entry::Occupied(mut cached) => match self.inner.update(id, transaction) {
                Ok(updated) => {
                    cached.insert(updated.clone());
                    Ok(updated)
                }
                Err(e) => {
                    cached.remove();
                    Err(e)
                }
            },
            Entry::Vacant(slot) => {
                let updated = self.inner.update(id, transaction)?;
                slot.insert(updated.clone());
                Ok(updated)
            }
        }
    }

    fn delete(&self, id: TransactionId) -> Result<(), LedgerError> {
        match self.cache.entry(id) {
            Entry::Occupied(cached) => {
                let result = self.inner.delete(id);
                cached.remove();
                result
            }
            Entry::Vacant(_) => self.inner.delete(id),
        }
    }

    fn list(&self) -> Vec<Transaction> {
        self.inner.list()
    }

    fn find_page(&self, filter: &TransactionFilter, page: usize, size: usize) -> Vec<Transaction> {
        self.inner.find_page(filter, page, size)
    }

    fn count(&self, filter: &TransactionFilter) -> usize {
        self.inner.count(filter)
    }
}
