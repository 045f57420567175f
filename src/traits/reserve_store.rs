//! Storage seam for pool reserves.

use crate::domain::PoolState;
use crate::store::Versioned;

/// Versioned storage of one pool's [`PoolState`].
///
/// The engine never holds a lock across pricing: it loads a snapshot,
/// derives the next state with pure functions, and asks the store to
/// install it only if nobody committed in between.  Any backend with an
/// atomic compare-and-swap on a version counter (an in-memory cell, a
/// database row with optimistic locking) can implement this trait.
///
/// # Contract
///
/// - [`load`](Self::load) returns a consistent `(version, state)` pair.
/// - [`compare_and_swap`](Self::compare_and_swap) installs `next` and
///   bumps the version by exactly one iff the current version equals
///   `expected_version`, returning whether it did.
/// - A refused swap means another writer committed.  A store that refuses
///   without progress makes [`transact`](crate::store::transact) give up
///   with `Storage` after [`MAX_CONFLICTS`](crate::store::MAX_CONFLICTS)
///   attempts.
pub trait ReserveStore: Send + Sync {
    /// Reads the current state and its version.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Storage`](crate::error::AmmError::Storage) if the
    /// backend is unavailable.
    fn load(&self) -> crate::error::Result<Versioned<PoolState>>;

    /// Installs `next` if the stored version is still `expected_version`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Storage`](crate::error::AmmError::Storage) if the
    /// backend is unavailable.  A version conflict is `Ok(false)`, not an
    /// error.
    fn compare_and_swap(&self, expected_version: u64, next: PoolState)
        -> crate::error::Result<bool>;
}
