//! In-process reserve store.

use std::sync::RwLock;

use super::Versioned;
use crate::domain::PoolState;
use crate::error::AmmError;
use crate::traits::ReserveStore;

/// [`ReserveStore`] backed by an `RwLock` around a versioned state.
///
/// Readers share the lock; a compare-and-swap holds the write lock only for
/// the version check and the assignment.
///
/// # Examples
///
/// ```
/// use twinpool::domain::PoolState;
/// use twinpool::store::InMemoryReserveStore;
/// use twinpool::traits::ReserveStore;
///
/// let store = InMemoryReserveStore::empty();
/// let snap = store.load().expect("readable");
/// assert_eq!(snap.version, 0);
/// assert!(store.compare_and_swap(0, PoolState::default()).expect("writable"));
/// assert!(!store.compare_and_swap(0, PoolState::default()).expect("writable"));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryReserveStore {
    cell: RwLock<Versioned<PoolState>>,
}

impl InMemoryReserveStore {
    /// Creates a store holding `state` at version 0.
    #[must_use]
    pub fn new(state: PoolState) -> Self {
        Self {
            cell: RwLock::new(Versioned::new(0, state)),
        }
    }

    /// Creates a store holding an empty pool.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(PoolState::default())
    }
}

impl ReserveStore for InMemoryReserveStore {
    fn load(&self) -> crate::error::Result<Versioned<PoolState>> {
        self.cell
            .read()
            .map(|guard| *guard)
            .map_err(|_| AmmError::Storage("reserve store lock poisoned"))
    }

    fn compare_and_swap(
        &self,
        expected_version: u64,
        next: PoolState,
    ) -> crate::error::Result<bool> {
        let mut guard = self
            .cell
            .write()
            .map_err(|_| AmmError::Storage("reserve store lock poisoned"))?;
        if guard.version != expected_version {
            return Ok(false);
        }
        let version = guard
            .version
            .checked_add(1)
            .ok_or(AmmError::Overflow("reserve store version overflow"))?;
        *guard = Versioned::new(version, next);
        Ok(true)
    }
}
