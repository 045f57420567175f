//! Optimistic read-compute-commit loop over a [`ReserveStore`].

use tracing::{error, trace, warn};

use crate::domain::PoolState;
use crate::error::AmmError;
use crate::traits::ReserveStore;

/// Consecutive compare-and-swap conflicts tolerated by one [`transact`].
///
/// Each conflict means another writer committed, so a live store stays far
/// below this; a store that keeps refusing writes is reported instead of
/// spinning forever.
pub const MAX_CONFLICTS: u64 = 10_000;

/// A state transition that was installed in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Committed<T> {
    /// Value produced by the step that won.
    pub output: T,
    /// State the step started from.
    pub before: PoolState,
    /// State that was installed.
    pub after: PoolState,
    /// Version of `after`.
    pub version: u64,
}

/// Runs `step` against the latest snapshot until its result commits.
///
/// `step` receives the snapshot and returns the next state plus an output.
/// It must be pure: on a version conflict it is simply called again with
/// the fresh snapshot, so every check it performs is re-evaluated against
/// the reserves that actually get replaced.  A step error aborts the
/// transaction before anything is written.
///
/// The next state is checked with [`PoolState::check_consistency`] before
/// the compare-and-swap.
///
/// # Errors
///
/// - Any error returned by `step`.
/// - [`AmmError::RoundingUnderflow`](crate::error::AmmError::RoundingUnderflow)
///   if the next state is inconsistent.
/// - [`AmmError::Storage`](crate::error::AmmError::Storage) from the store,
///   or after [`MAX_CONFLICTS`] consecutive conflicts.
pub fn transact<S, T, F>(store: &S, mut step: F) -> crate::error::Result<Committed<T>>
where
    S: ReserveStore + ?Sized,
    F: FnMut(&PoolState) -> crate::error::Result<(PoolState, T)>,
{
    let mut conflicts: u64 = 0;
    loop {
        let snapshot = store.load()?;
        let (next, output) = step(&snapshot.value)?;
        if let Err(e) = next.check_consistency() {
            error!(error = %e, state = %next, "refusing to commit inconsistent pool state");
            return Err(e);
        }
        if store.compare_and_swap(snapshot.version, next)? {
            return Ok(Committed {
                output,
                before: snapshot.value,
                after: next,
                version: snapshot.version.saturating_add(1),
            });
        }
        conflicts = conflicts.saturating_add(1);
        if conflicts >= MAX_CONFLICTS {
            warn!(conflicts, version = snapshot.version, "reserve store keeps refusing writes");
            return Err(AmmError::Storage("too many compare-and-swap conflicts"));
        }
        trace!(conflicts, version = snapshot.version, "reserve store conflict, retrying");
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::domain::{Amount, Shares};
    use crate::store::{InMemoryReserveStore, Versioned};

    #[test]
    fn commits_step_output() {
        let store = InMemoryReserveStore::empty();
        let seeded = PoolState::new(Amount::new(1), Amount::new(1), Shares::new(1));
        let Ok(c) = transact(&store, |_| Ok((seeded, 7u8))) else {
            panic!("expected Ok");
        };
        assert_eq!(c.output, 7);
        assert_eq!(c.version, 1);
        assert_eq!(c.after, seeded);
        assert!(c.before.is_empty());
    }

    #[test]
    fn step_error_writes_nothing() {
        let store = InMemoryReserveStore::empty();
        let r: crate::error::Result<Committed<()>> =
            transact(&store, |_| Err(AmmError::NoOpSwap));
        assert_eq!(r.map(|c| c.version), Err(AmmError::NoOpSwap));
        assert_eq!(store.load().map(|s| s.version), Ok(0));
    }

    #[test]
    fn inconsistent_next_state_is_refused() {
        let store = InMemoryReserveStore::empty();
        let broken = PoolState::new(Amount::new(1), Amount::ZERO, Shares::ZERO);
        let r = transact(&store, |_| Ok((broken, ())));
        assert!(matches!(r, Err(AmmError::RoundingUnderflow(_))));
        assert_eq!(store.load().map(|s| s.version), Ok(0));
    }

    /// Store that reports a conflict on the first compare-and-swap.
    struct FlakyStore {
        inner: InMemoryReserveStore,
        failures: AtomicU32,
    }

    impl ReserveStore for FlakyStore {
        fn load(&self) -> crate::error::Result<Versioned<PoolState>> {
            self.inner.load()
        }

        fn compare_and_swap(&self, v: u64, next: PoolState) -> crate::error::Result<bool> {
            if self.failures.fetch_sub(1, Ordering::SeqCst) > 0 {
                return Ok(false);
            }
            self.inner.compare_and_swap(v, next)
        }
    }

    #[test]
    fn conflict_reruns_step() {
        let store = FlakyStore {
            inner: InMemoryReserveStore::empty(),
            failures: AtomicU32::new(1),
        };
        let mut calls = 0;
        let Ok(c) = transact(&store, |s| {
            calls += 1;
            Ok((*s, ()))
        }) else {
            panic!("expected Ok");
        };
        assert_eq!(calls, 2);
        assert_eq!(c.version, 1);
    }

    /// Store that never accepts a write.
    struct RefusingStore {
        inner: InMemoryReserveStore,
    }

    impl ReserveStore for RefusingStore {
        fn load(&self) -> crate::error::Result<Versioned<PoolState>> {
            self.inner.load()
        }

        fn compare_and_swap(&self, _: u64, _: PoolState) -> crate::error::Result<bool> {
            Ok(false)
        }
    }

    #[test]
    fn endless_conflicts_surface_as_storage_error() {
        let store = RefusingStore {
            inner: InMemoryReserveStore::empty(),
        };
        let mut calls = 0u64;
        let r = transact(&store, |s| {
            calls += 1;
            Ok((*s, ()))
        });
        assert!(matches!(r, Err(AmmError::Storage(_))));
        assert_eq!(calls, MAX_CONFLICTS);
    }
}
