//! Core ledger module
//!
//! This module contains the ledger components:
//! - `clock` - Wall-clock sources for id issuance
//! - `id_generator` - Snowflake-style unique id generator
//! - `traits` - The `TransactionStore` abstraction shared by store and cache
//! - `filter` - Query predicate, ordering and pagination
//! - `transaction_store` - Concurrent in-memory store (source of truth)
//! - `cached_store` - Read-through cache decorator
//! - `ledger` - Façade composing generator, store and cache

pub mod cached_store;
pub mod clock;
pub mod filter;
pub mod id_generator;
pub mod ledger;
pub mod traits;
pub mod transaction_store;

pub use cached_store::CachedTransactionStore;
pub use clock::{Clock, ManualClock, SystemClock};
pub use filter::TransactionFilter;
pub use id_generator::{decompose, IdGenerator, IdParts};
pub use ledger::{Ledger, LedgerConfig};
pub use traits::TransactionStore;
pub use transaction_store::InMemoryTransactionStore;
