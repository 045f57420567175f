//! Deterministic fixed-point exchange rate.

use core::fmt;

use fixed::types::I80F48;
use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::AmmError;
use crate::math::{mul_div_wide, narrow, widen};

/// Number of fractional bits in [`I80F48`].
const FRAC_BITS: u32 = 48;

/// Exchange rate between the two pool assets as a dimensionless ratio.
///
/// Backed by [`I80F48`], so the value is an exact integer bit pattern
/// (`ratio × 2^48`, floored) and compares identically on every platform.
/// Prices are derived, read-side values: the engine quotes and executes on
/// integer reserves and never feeds a `Price` back into a mutation.
///
/// # Examples
///
/// ```
/// use twinpool::domain::{Amount, Price};
///
/// let p = Price::from_ratio(Amount::new(2_000_000), Amount::new(1_000_000)).expect("non-zero");
/// assert_eq!(p.to_string(), "2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(I80F48);

impl Price {
    /// A 1:1 rate.
    pub const ONE: Self = Self(I80F48::ONE);

    /// A zero rate.
    pub const ZERO: Self = Self(I80F48::ZERO);

    /// Computes `numerator / denominator`, floored to the fixed-point grid.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivisionByZero`] if `denominator` is zero.
    /// - [`AmmError::Overflow`] if the ratio exceeds the `I80F48` range
    ///   (about `6 × 10^23`).
    pub fn from_ratio(numerator: Amount, denominator: Amount) -> crate::error::Result<Self> {
        let bits = mul_div_wide(
            widen(numerator.get()),
            widen(1u128 << FRAC_BITS),
            widen(denominator.get()),
            Rounding::Down,
        )?;
        let bits = narrow(bits, "price ratio out of range")?;
        let bits = i128::try_from(bits).map_err(|_| AmmError::Overflow("price ratio out of range"))?;
        Ok(Self(I80F48::from_bits(bits)))
    }

    /// Wraps an existing fixed-point value.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if the value is negative.
    pub fn from_fixed(value: I80F48) -> crate::error::Result<Self> {
        if value < I80F48::ZERO {
            return Err(AmmError::InvalidInput("price must be non-negative"));
        }
        Ok(Self(value))
    }

    /// Returns the fixed-point value.
    #[must_use]
    pub const fn to_fixed(&self) -> I80F48 {
        self.0
    }

    /// Returns the raw `ratio × 2^48` bit pattern.
    #[must_use]
    pub const fn to_bits(&self) -> i128 {
        self.0.to_bits()
    }

    /// Returns `true` if the rate is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == I80F48::ZERO
    }

    /// Computes the reciprocal rate.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivisionByZero`] if the rate is zero.
    /// - [`AmmError::Overflow`] if the reciprocal is out of range.
    pub fn inverse(&self) -> crate::error::Result<Self> {
        if self.is_zero() {
            return Err(AmmError::DivisionByZero);
        }
        self.0
            .checked_recip()
            .map(Self)
            .ok_or(AmmError::Overflow("price inverse out of range"))
    }

    /// Converts `amount` at this rate, with explicit rounding.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds `u128`.
    pub fn convert(&self, amount: Amount, rounding: Rounding) -> crate::error::Result<Amount> {
        // to_bits() is non-negative by construction
        let bits = self.0.to_bits().unsigned_abs();
        let q = mul_div_wide(
            widen(amount.get()),
            widen(bits),
            widen(1u128 << FRAC_BITS),
            rounding,
        )?;
        narrow(q, "price conversion overflow").map(Amount::new)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
