//! Destination for sampled prices.

use crate::domain::PricePoint;

/// Append-only destination for [`PricePoint`]s.
///
/// Recording is best-effort telemetry: the sampler logs a failed
/// `record` and carries on, so implementations may fail freely.
pub trait PriceSink: Send + Sync {
    /// Appends one sample.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::History`](crate::error::AmmError::History) (or any
    /// other variant) if the sample could not be stored.
    fn record(&self, point: PricePoint) -> crate::error::Result<()>;
}
