//! Checked arithmetic trait for domain wrapper types.
//!
//! [`CheckedArithmetic`] turns the `Option`-returning primitives of
//! [`Amount`] and [`Shares`] into `Result`s carrying a specific
//! [`AmmError`], so reserve updates can be chained with `?`.
//!
//! # Examples
//!
//! ```
//! use twinpool::domain::Amount;
//! use twinpool::math::CheckedArithmetic;
//!
//! let reserve = Amount::new(1_000);
//! assert_eq!(reserve.safe_add(&Amount::new(10)), Ok(Amount::new(1_010)));
//! assert!(reserve.safe_sub(&Amount::new(1_001)).is_err());
//! ```

use crate::domain::{Amount, Rounding, Shares};
use crate::error::AmmError;

use super::mul_div;

/// Fallible arithmetic for domain wrapper types.
///
/// No method panics and none saturates; every failure is an `Err`.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::RoundingUnderflow`] if the result would be
    /// negative.  Reserves and supplies are only ever decremented by values
    /// derived from them, so this indicates a logic bug.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;

    /// Computes `self × numerator / denominator` with explicit rounding.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivisionByZero`] if `denominator` is zero.
    /// - [`AmmError::Overflow`] if the quotient does not fit.
    fn safe_mul_div(
        &self,
        numerator: u128,
        denominator: u128,
        rounding: Rounding,
    ) -> Result<Self, AmmError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::RoundingUnderflow("amount subtraction underflow"))
    }

    #[inline]
    fn safe_mul_div(
        &self,
        numerator: u128,
        denominator: u128,
        rounding: Rounding,
    ) -> Result<Self, AmmError> {
        mul_div(self.get(), numerator, denominator, rounding).map(Amount::new)
    }
}

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("share addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::RoundingUnderflow("share subtraction underflow"))
    }

    #[inline]
    fn safe_mul_div(
        &self,
        numerator: u128,
        denominator: u128,
        rounding: Rounding,
    ) -> Result<Self, AmmError> {
        mul_div(self.get(), numerator, denominator, rounding).map(Shares::new)
    }
}
