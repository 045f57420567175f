//! Reserve storage and the optimistic transaction loop.
//!
//! Every write to the pool goes through [`transact`]: load a versioned
//! snapshot, derive the next state with pure functions, and commit with a
//! compare-and-swap on the version.  Two writers can never both commit a
//! state derived from the same snapshot.

mod memory;
mod transaction;

pub use memory::InMemoryReserveStore;
pub use transaction::{transact, Committed, MAX_CONFLICTS};

use serde::{Deserialize, Serialize};

/// A value tagged with the version it was stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Versioned<T> {
    /// Monotonic write counter; bumps by one per committed write.
    pub version: u64,
    /// The stored value.
    pub value: T,
}

impl<T> Versioned<T> {
    /// Wraps `value` at `version`.
    pub const fn new(version: u64, value: T) -> Self {
        Self { version, value }
    }
}
