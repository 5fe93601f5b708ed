//! Snowflake-style transaction id generator
//!
//! Issues unique, time-ordered 63-bit ids without coordination beyond a
//! distinct (worker, datacenter) pair per generator.
//!
//! # Layout
//!
//! ```text
//!  63        22        17       12          0
//!  +----------+---------+--------+----------+
//!  | 41 bits  | 5 bits  | 5 bits | 12 bits  |
//!  | ms since | data-   | worker | sequence |
//!  | epoch    | center  |        |          |
//!  +----------+---------+--------+----------+
//! ```
//!
//! The epoch is 2024-01-01T00:00:00Z. The sign bit is always zero.
//!
//! # Locking
//!
//! `next_id` runs entirely under one mutex, including the spin that waits out
//! an exhausted millisecond. Issuance is therefore fully serialized per
//! generator; callers that arrive during the spin queue behind it.

use crate::core::clock::{Clock, SystemClock};
use crate::types::{LedgerError, TransactionId};
use std::sync::{Mutex, PoisonError};
use tracing::error;

/// Custom epoch: 2024-01-01T00:00:00Z in Unix milliseconds
pub const CUSTOM_EPOCH_MS: u64 = 1_704_067_200_000;

const WORKER_ID_BITS: u32 = 5;
const DATACENTER_ID_BITS: u32 = 5;
const SEQUENCE_BITS: u32 = 12;

/// Largest accepted worker id (31)
pub const MAX_WORKER_ID: u8 = (1 << WORKER_ID_BITS) - 1;
/// Largest accepted datacenter id (31)
pub const MAX_DATACENTER_ID: u8 = (1 << DATACENTER_ID_BITS) - 1;
/// Ids available per millisecond per generator
pub const SEQUENCE_PER_MILLI: u16 = 1 << SEQUENCE_BITS;

const SEQUENCE_MASK: u16 = SEQUENCE_PER_MILLI - 1;
const WORKER_ID_SHIFT: u32 = SEQUENCE_BITS;
const DATACENTER_ID_SHIFT: u32 = SEQUENCE_BITS + WORKER_ID_BITS;
const TIMESTAMP_SHIFT: u32 = SEQUENCE_BITS + WORKER_ID_BITS + DATACENTER_ID_BITS;

/// Fields decoded from an issued id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdParts {
    /// Issue time in Unix milliseconds
    pub timestamp_ms: u64,
    pub datacenter_id: u8,
    pub worker_id: u8,
    pub sequence: u16,
}

/// Split an id back into its fields
pub fn decompose(id: TransactionId) -> IdParts {
    let raw = id as u64;
    IdParts {
        timestamp_ms: (raw >> TIMESTAMP_SHIFT) + CUSTOM_EPOCH_MS,
        datacenter_id: ((raw >> DATACENTER_ID_SHIFT) & u64::from(MAX_DATACENTER_ID)) as u8,
        worker_id: ((raw >> WORKER_ID_SHIFT) & u64::from(MAX_WORKER_ID)) as u8,
        sequence: (raw & u64::from(SEQUENCE_MASK)) as u16,
    }
}

/// Counters owned by the generator, only touched under its lock
#[derive(Debug)]
struct GeneratorState {
    last_timestamp: u64,
    sequence: u16,
}

/// Thread-safe Snowflake id generator
///
/// Construct one per process identity and share it by reference (or `Arc`).
/// Two generators with the same worker and datacenter ids can issue
/// duplicate ids; keeping the pairs distinct is the operator's job.
#[derive(Debug)]
pub struct IdGenerator<C: Clock = SystemClock> {
    worker_id: u8,
    datacenter_id: u8,
    clock: C,
    state: Mutex<GeneratorState>,
}

impl IdGenerator<SystemClock> {
    /// Create a generator reading the system clock
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if either id exceeds 31.
    pub fn new(worker_id: u8, datacenter_id: u8) -> Result<Self, LedgerError> {
        Self::with_clock(worker_id, datacenter_id, SystemClock)
    }
}

impl<C: Clock> IdGenerator<C> {
    /// Create a generator reading time from `clock`
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if either id exceeds 31.
    pub fn with_clock(worker_id: u8, datacenter_id: u8, clock: C) -> Result<Self, LedgerError> {
        if worker_id > MAX_WORKER_ID {
            return Err(LedgerError::invalid_configuration(
                "worker_id",
                u64::from(worker_id),
                u64::from(MAX_WORKER_ID),
            ));
        }
        if datacenter_id > MAX_DATACENTER_ID {
            return Err(LedgerError::invalid_configuration(
                "datacenter_id",
                u64::from(datacenter_id),
                u64::from(MAX_DATACENTER_ID),
            ));
        }

        Ok(Self {
            worker_id,
            datacenter_id,
            clock,
            state: Mutex::new(GeneratorState {
                last_timestamp: CUSTOM_EPOCH_MS,
                sequence: 0,
            }),
        })
    }

    pub fn worker_id(&self) -> u8 {
        self.worker_id
    }

    pub fn datacenter_id(&self) -> u8 {
        self.datacenter_id
    }

    /// Issue the next id
    ///
    /// # Errors
    ///
    /// `ClockMovedBackwards` if the clock reads earlier than the last issued
    /// id (or earlier than the custom epoch). No id is consumed.
    pub fn next_id(&self) -> Result<TransactionId, LedgerError> {
        // The state is two integers with no cross-field invariant a panic could break.
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let mut now = self.clock.now_millis();
        if now < state.last_timestamp {
            error!(
                last_timestamp = state.last_timestamp,
                now, "clock moved backwards, refusing to issue id"
            );
            return Err(LedgerError::clock_moved_backwards(state.last_timestamp, now));
        }

        if now == state.last_timestamp {
            state.sequence = (state.sequence + 1) & SEQUENCE_MASK;
            if state.sequence == 0 {
                now = self.wait_next_millis(state.last_timestamp);
            }
        } else {
            state.sequence = 0;
        }

        state.last_timestamp = now;
        Ok(self.compose(now, state.sequence))
    }

    /// Spin until the clock reads past `last_timestamp`
    fn wait_next_millis(&self, last_timestamp: u64) -> u64 {
        let mut now = self.clock.now_millis();
        while now <= last_timestamp {
            std::thread::yield_now();
            now = self.clock.now_millis();
        }
        now
    }

    fn compose(&self, timestamp: u64, sequence: u16) -> TransactionId {
        let raw = ((timestamp - CUSTOM_EPOCH_MS) << TIMESTAMP_SHIFT)
            | (u64::from(self.datacenter_id) << DATACENTER_ID_SHIFT)
            | (u64::from(self.worker_id) << WORKER_ID_SHIFT)
            | u64::from(sequence);
        raw as TransactionId
    }
}
