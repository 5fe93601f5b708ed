//! Ledger façade
//!
//! This module provides the `Ledger`, which composes the id generator, the
//! transaction store and the optional read cache into the operations used by
//! the outer layers.
//!
//! # Control Flow
//!
//! ```text
//! create        → IdGenerator::next_id → store.insert (→ cache put)
//! get           → cache hit, or store.get (→ cache fill)
//! update/delete → store mutation (→ cache overwrite/evict)
//! list/page     → store scan, cache bypassed
//! ```
//!
//! The ledger performs no validation of its own: inputs are expected to have
//! passed [`crate::validation`] (or an equivalent check) already.

use crate::core::cached_store::CachedTransactionStore;
use crate::core::clock::{Clock, SystemClock};
use crate::core::filter::TransactionFilter;
use crate::core::id_generator::IdGenerator;
use crate::core::traits::TransactionStore;
use crate::core::transaction_store::InMemoryTransactionStore;
use crate::types::{LedgerError, NewTransaction, Transaction, TransactionId, TransactionPage};
use tracing::{debug, info, warn};

/// Settings needed to assemble a ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Worker id embedded in issued ids (0-31)
    pub worker_id: u8,
    /// Datacenter id embedded in issued ids (0-31)
    pub datacenter_id: u8,
    /// Put a read-through cache in front of the store
    pub cache_enabled: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            worker_id: 0,
            datacenter_id: 0,
            cache_enabled: true,
        }
    }
}

/// Transaction ledger
///
/// Owns its generator and store; share it between threads with `Arc`.
pub struct Ledger<C: Clock = SystemClock> {
    generator: IdGenerator<C>,
    store: Box<dyn TransactionStore>,
}

impl Ledger<SystemClock> {
    /// Build a ledger on the system clock
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if the worker or datacenter id exceeds 31.
    pub fn new(config: &LedgerConfig) -> Result<Self, LedgerError> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Ledger<C> {
    /// Build a ledger whose generator reads `clock`
    pub fn with_clock(config: &LedgerConfig, clock: C) -> Result<Self, LedgerError> {
        let generator = IdGenerator::with_clock(config.worker_id, config.datacenter_id, clock)?;
        let store: Box<dyn TransactionStore> = if config.cache_enabled {
            Box::new(CachedTransactionStore::new(InMemoryTransactionStore::new()))
        } else {
            Box::new(InMemoryTransactionStore::new())
        };

        info!(
            worker_id = config.worker_id,
            datacenter_id = config.datacenter_id,
            cache_enabled = config.cache_enabled,
            "ledger initialized"
        );
        Ok(Self::from_parts(generator, store))
    }

    /// Assemble a ledger from an existing generator and store
    pub fn from_parts(generator: IdGenerator<C>, store: Box<dyn TransactionStore>) -> Self {
        Self { generator, store }
    }

    /// Record a new transaction under a freshly issued id
    ///
    /// # Errors
    ///
    /// `ClockMovedBackwards` if the generator refuses to issue an id; nothing
    /// is stored in that case.
    pub fn create(&self, transaction: NewTransaction) -> Result<Transaction, LedgerError> {
        let id = self.generator.next_id()?;
        let created = self.store.insert(Transaction::from_new(id, transaction));
        info!(id, tx_type = %created.tx_type, amount = %created.amount, "transaction created");
        Ok(created)
    }

    pub fn get(&self, id: TransactionId) -> Result<Transaction, LedgerError> {
        debug!(id, "retrieving transaction");
        self.store.get(id).inspect_err(|_| {
            warn!(id, "transaction not found");
        })
    }

    /// Every transaction, in no particular order
    pub fn list(&self) -> Vec<Transaction> {
        let transactions = self.store.list();
        debug!(count = transactions.len(), "listed transactions");
        transactions
    }

    /// One page of matching transactions, most recent first
    ///
    /// Pages past the end are empty, never an error.
    pub fn find_page(
        &self,
        filter: &TransactionFilter,
        page: usize,
        size: usize,
    ) -> Vec<Transaction> {
        let transactions = self.store.find_page(filter, page, size);
        debug!(?filter, page, size, returned = transactions.len(), "paged query");
        transactions
    }

    /// Number of transactions matching the filter
    pub fn count(&self, filter: &TransactionFilter) -> usize {
        let count = self.store.count(filter);
        debug!(?filter, count, "filtered count");
        count
    }

    /// A page together with its pagination metadata
    ///
    /// The page and the total come from two separate scans, so under
    /// concurrent writes they may reflect slightly different states.
    pub fn page(&self, filter: &TransactionFilter, page: usize, size: usize) -> TransactionPage {
        let content = self.find_page(filter, page, size);
        let total = self.count(filter);
        if content.is_empty() && total > 0 {
            warn!(page, size, total, "page index exceeds the available data");
        }
        TransactionPage::new(content, page, size, total)
    }

    /// Replace every field of an existing transaction, keeping its id
    pub fn update(
        &self,
        id: TransactionId,
        transaction: NewTransaction,
    ) -> Result<Transaction, LedgerError> {
        let updated = self.store.update(id, transaction).inspect_err(|_| {
            warn!(id, "cannot update missing transaction");
        })?;
        info!(id, status = %updated.status, "transaction updated");
        Ok(updated)
    }

    pub fn delete(&self, id: TransactionId) -> Result<(), LedgerError> {
        self.store.delete(id).inspect_err(|_| {
            warn!(id, "cannot delete missing transaction");
        })?;
        info!(id, "transaction deleted");
        Ok(())
    }

    /// The generator issuing this ledger's ids
    pub fn generator(&self) -> &IdGenerator<C> {
        &self.generator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::id_generator::{decompose, CUSTOM_EPOCH_MS};
    use crate::types::{TransactionStatus, TransactionType};
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn deposit() -> NewTransaction {
        NewTransaction::new(TransactionType::Deposit, "Salary payment", Decimal::new(250000, 2))
            .with_destination("ACCT87654321")
    }

    #[rstest]
    #[case::bad_worker(LedgerConfig { worker_id: 32, ..LedgerConfig::default() })]
    #[case::bad_datacenter(LedgerConfig { datacenter_id: 200, ..LedgerConfig::default() })]
    fn test_invalid_configuration_fails_construction(#[case] config: LedgerConfig) {
        assert!(matches!(
            Ledger::new(&config),
            Err(LedgerError::InvalidConfiguration { .. })
        ));
    }

    #[rstest]
    fn test_crud_round_trip(#[values(true, false)] cache_enabled: bool) {
        let ledger = Ledger::new(&LedgerConfig {
            cache_enabled,
            ..LedgerConfig::default()
        })
        .unwrap();

        let created = ledger.create(deposit()).unwrap();
        assert!(created.id > 0);
        assert_eq!(created.status, TransactionStatus::Initiated);
        assert_eq!(ledger.get(created.id).unwrap(), created);

        let replacement = NewTransaction::new(TransactionType::Transfer, "Rent payment", Decimal::new(90000, 2))
            .with_source("ACCT12345678")
            .with_destination("ACCT87654321")
            .with_status(TransactionStatus::Processing);
        let updated = ledger.update(created.id, replacement.clone()).unwrap();
        assert_eq!(updated, Transaction::from_new(created.id, replacement));
        assert_eq!(ledger.get(created.id).unwrap(), updated);

        ledger.delete(created.id).unwrap();
        assert!(ledger.get(created.id).unwrap_err().is_not_found());
        assert!(ledger.update(created.id, deposit()).unwrap_err().is_not_found());
        assert!(ledger.delete(created.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_ids_carry_configured_identity() {
        let config = LedgerConfig {
            worker_id: 4,
            datacenter_id: 12,
            cache_enabled: true,
        };
        let ledger = Ledger::new(&config).unwrap();

        let parts = decompose(ledger.create(deposit()).unwrap().id);

        assert_eq!(parts.worker_id, 4);
        assert_eq!(parts.datacenter_id, 12);
    }

    #[test]
    fn test_clock_rollback_stores_nothing() {
        let clock = Arc::new(ManualClock::new(CUSTOM_EPOCH_MS + 10_000));
        let ledger = Ledger::with_clock(&LedgerConfig::default(), Arc::clone(&clock)).unwrap();
        ledger.create(deposit()).unwrap();

        clock.set(CUSTOM_EPOCH_MS + 9_000);
        let result = ledger.create(deposit());

        assert!(matches!(result, Err(LedgerError::ClockMovedBackwards { .. })));
        assert_eq!(ledger.list().len(), 1);
    }

    #[test]
    fn test_page_envelope() {
        let ledger = Ledger::new(&LedgerConfig::default()).unwrap();
        for _ in 0..7 {
            ledger.create(deposit()).unwrap();
        }

        let page = ledger.page(&TransactionFilter::new(), 1, 3);

        assert_eq!(page.content.len(), 3);
        assert_eq!(page.total_elements, 7);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());
        assert!(page.has_previous());

        let beyond = ledger.page(&TransactionFilter::new(), 3, 3);
        assert!(beyond.content.is_empty());
        assert_eq!(beyond.total_elements, 7);
    }

    #[test]
    fn test_from_parts_accepts_custom_store() {
        let generator = IdGenerator::new(1, 1).unwrap();
        let ledger = Ledger::from_parts(generator, Box::new(InMemoryTransactionStore::new()));

        let created = ledger.create(deposit()).unwrap();

        assert_eq!(ledger.count(&TransactionFilter::new()), 1);
        assert_eq!(ledger.get(created.id).unwrap().id, created.id);
        assert_eq!(ledger.generator().worker_id(), 1);
    }
}
