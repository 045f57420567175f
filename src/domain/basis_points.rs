//! Basis-point representation for rates and tolerances.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::AmmError;

/// Denominator for basis-point arithmetic (10 000 bp = 100%).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// A percentage expressed in basis points (1 bp = 0.01%).
///
/// Used for the swap fee, slippage tolerances and reported price impact.
/// Values above 10 000 are representable but are rejected wherever a rate
/// is applied; see [`is_valid_percent`](Self::is_valid_percent).
///
/// # Examples
///
/// ```
/// use twinpool::domain::{Amount, BasisPoints, Rounding};
///
/// let fee = BasisPoints::new(30);
/// let cut = fee.apply(Amount::new(10_000), Rounding::Down).expect("in range");
/// assert_eq!(cut, Amount::new(30));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX_PERCENT: Self = Self(BPS_DENOMINATOR);

    /// Creates a new `BasisPoints` from a raw value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value is in `0..=10_000`.
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= BPS_DENOMINATOR
    }

    /// Returns `10_000 - self`, the retained fraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if the value exceeds 100%.
    pub const fn complement(&self) -> crate::error::Result<Self> {
        if !self.is_valid_percent() {
            return Err(AmmError::InvalidInput("basis points exceed 100%"));
        }
        Ok(Self(BPS_DENOMINATOR - self.0))
    }

    /// Computes `amount × self / 10 000` with explicit rounding.
    ///
    /// The product is formed in 256-bit space so any `u128` amount is
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if the rate exceeds 100%.
    pub fn apply(&self, amount: Amount, rounding: Rounding) -> crate::error::Result<Amount> {
        if !self.is_valid_percent() {
            return Err(AmmError::InvalidInput("basis points exceed 100%"));
        }
        let raw = crate::math::mul_div(
            amount.get(),
            u128::from(self.0),
            u128::from(BPS_DENOMINATOR),
            rounding,
        )?;
        Ok(Amount::new(raw))
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
