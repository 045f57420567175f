//! Best-effort spot-price sampling for charts.
//!
//! The sampler only ever reads the reserve store.  A failing
//! [`PriceSink`] is logged and otherwise ignored; it can never block a
//! swap or a liquidity operation.

mod memory;

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

pub use memory::InMemoryPriceHistory;

use crate::domain::{PoolStats, PricePoint};
use crate::error::AmmError;
use crate::pricing::spot_price;
use crate::traits::{PriceSink, ReserveStore};

/// Samples `reserve_b / reserve_a` into a [`PriceSink`].
///
/// Each point carries the swap volume committed since the previous sample,
/// derived from the pool's lifetime counters.
#[derive(Debug)]
pub struct PriceSampler<S, K> {
    store: Arc<S>,
    sink: Arc<K>,
    last_stats: Mutex<PoolStats>,
}

impl<S: ReserveStore, K: PriceSink> PriceSampler<S, K> {
    /// Creates a sampler; the first sample reports lifetime volume.
    #[must_use]
    pub fn new(store: Arc<S>, sink: Arc<K>) -> Self {
        Self {
            store,
            sink,
            last_stats: Mutex::new(PoolStats::default()),
        }
    }

    /// Samples now.
    ///
    /// # Errors
    ///
    /// See [`sample_at`](Self::sample_at).
    pub fn sample(&self) -> crate::error::Result<PricePoint> {
        self.sample_at(Utc::now())
    }

    /// Samples with an explicit timestamp.
    ///
    /// The point is returned even if the sink fails to record it; its
    /// volume is then carried into the next sample.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`] if the pool is empty; nothing is recorded.
    /// - [`AmmError::Storage`] if the store is unavailable.
    /// - [`AmmError::History`] if the sampler's own state is poisoned.
    pub fn sample_at(&self, timestamp: DateTime<Utc>) -> crate::error::Result<PricePoint> {
        // held across load and record so samples see monotonic counters
        let mut last = self
            .last_stats
            .lock()
            .map_err(|_| AmmError::History("sampler state lock poisoned"))?;

        let state = self.store.load()?.value;
        if state.is_empty() {
            return Err(AmmError::InvalidInput("cannot sample an empty pool"));
        }
        let spot = spot_price(state.reserve_a(), state.reserve_b())?;

        let stats = *state.stats();
        let point = PricePoint {
            timestamp,
            spot_price: spot,
            volume_a: stats.volume_a.saturating_sub(&last.volume_a),
            volume_b: stats.volume_b.saturating_sub(&last.volume_b),
        };

        // unrecorded volume rolls into the next point
        match self.sink.record(point) {
            Ok(()) => {
                *last = stats;
                debug!(price = %point.spot_price, "price sampled");
            }
            Err(e) => warn!(error = %e, "price sample not recorded"),
        }
        Ok(point)
    }
}
