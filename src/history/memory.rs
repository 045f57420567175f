//! Bounded in-memory price history.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::domain::PricePoint;
use crate::error::AmmError;
use crate::traits::PriceSink;

/// Ring buffer of the most recent [`PricePoint`]s, oldest first.
///
/// Samples must arrive in non-decreasing timestamp order; an older sample
/// is refused so that [`range`](Self::range) can rely on ordering.
#[derive(Debug)]
pub struct InMemoryPriceHistory {
    capacity: usize,
    points: Mutex<VecDeque<PricePoint>>,
}

impl InMemoryPriceHistory {
    /// Creates a history keeping at most `capacity` points.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `capacity` is zero.
    pub fn new(capacity: usize) -> crate::error::Result<Self> {
        if capacity == 0 {
            return Err(AmmError::InvalidConfiguration(
                "history capacity must be positive",
            ));
        }
        Ok(Self {
            capacity,
            points: Mutex::new(VecDeque::with_capacity(capacity)),
        })
    }

    /// Maximum number of retained points.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    fn guard(&self) -> crate::error::Result<MutexGuard<'_, VecDeque<PricePoint>>> {
        self.points
            .lock()
            .map_err(|_| AmmError::History("price history lock poisoned"))
    }

    /// All retained points, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::History`] if the buffer lock is poisoned.
    pub fn points(&self) -> crate::error::Result<Vec<PricePoint>> {
        Ok(self.guard()?.iter().copied().collect())
    }

    /// The most recent point, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::History`] if the buffer lock is poisoned.
    pub fn latest(&self) -> crate::error::Result<Option<PricePoint>> {
        Ok(self.guard()?.back().copied())
    }

    /// Points with `from <= timestamp < to`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::History`] if the buffer lock is poisoned.
    pub fn range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> crate::error::Result<Vec<PricePoint>> {
        Ok(self
            .guard()?
            .iter()
            .filter(|p| p.timestamp >= from && p.timestamp < to)
            .copied()
            .collect())
    }

    /// Number of retained points.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::History`] if the buffer lock is poisoned.
    pub fn len(&self) -> crate::error::Result<usize> {
        Ok(self.guard()?.len())
    }
}

impl PriceSink for InMemoryPriceHistory {
    fn record(&self, point: PricePoint) -> crate::error::Result<()> {
        let mut points = self.guard()?;
        if points.back().is_some_and(|last| point.timestamp < last.timestamp) {
            return Err(AmmError::History("sample older than latest point"));
        }
        if points.len() == self.capacity {
            points.pop_front();
        }
        points.push_back(point);
        Ok(())
    }
}
