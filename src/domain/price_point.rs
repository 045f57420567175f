//! Sampled spot price for charting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Amount, Price};

/// One observation of the pool's spot price.
///
/// `spot_price` is `reserve_b / reserve_a` (units of B per unit of A).
/// Volumes are the swap inputs committed since the previous sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// When the sample was taken.
    pub timestamp: DateTime<Utc>,
    /// Units of asset B per unit of asset A.
    pub spot_price: Price,
    /// Asset A sold into the pool since the previous sample.
    pub volume_a: Amount,
    /// Asset B sold into the pool since the previous sample.
    pub volume_b: Amount,
}
