//! 256-bit intermediates for products of two `u128` values.
//!
//! Reserves and amounts are `u128`, so `reserve × amount` can need up to
//! 256 bits.  Every formula in [`pricing`](crate::pricing) forms its
//! products here and only narrows back to `u128` for the final result.

use ethnum::U256;

use crate::domain::Rounding;
use crate::error::AmmError;

/// Widens a `u128` into 256-bit space.
#[inline]
#[must_use]
pub const fn widen(value: u128) -> U256 {
    U256::new(value)
}

/// Narrows a 256-bit value back to `u128`.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] with `context` if the value does not fit.
#[inline]
pub const fn narrow(value: U256, context: &'static str) -> Result<u128, AmmError> {
    let (hi, lo) = value.into_words();
    if hi != 0 {
        return Err(AmmError::Overflow(context));
    }
    Ok(lo)
}

/// Computes `a × b / denominator` in 256-bit space with explicit rounding.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::Overflow`] if the product overflows 256 bits.
pub fn mul_div_wide(a: U256, b: U256, denominator: U256, rounding: Rounding) -> Result<U256, AmmError> {
    if denominator == U256::ZERO {
        return Err(AmmError::DivisionByZero);
    }
    let product = a
        .checked_mul(b)
        .ok_or(AmmError::Overflow("mul_div product overflow"))?;
    let quotient = product / denominator;
    if rounding.is_up() && product % denominator != U256::ZERO {
        // A non-zero remainder implies quotient < product <= U256::MAX.
        return Ok(quotient + U256::ONE);
    }
    Ok(quotient)
}

/// Computes `a × b / denominator` for `u128` operands.
///
/// The product never overflows; only a quotient wider than `u128` fails.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::Overflow`] if the quotient exceeds `u128::MAX`.
///
/// # Examples
///
/// ```
/// use twinpool::domain::Rounding;
/// use twinpool::math::mul_div;
///
/// // 9_970 × 2_000_000 / 1_009_970
/// assert_eq!(mul_div(9_970, 2_000_000, 1_009_970, Rounding::Down), Ok(19_743));
/// ```
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128, AmmError> {
    let q = mul_div_wide(widen(a), widen(b), widen(denominator), rounding)?;
    narrow(q, "mul_div quotient exceeds u128")
}

/// Integer square root (floor) via Newton's method.
#[must_use]
pub fn isqrt(n: U256) -> U256 {
    if n == U256::ZERO {
        return U256::ZERO;
    }
    let mut x = n;
    // ceil(n / 2) without the overflow of n + 1
    let mut y = (n >> 1u32) + (n & U256::ONE);
    while y < x {
        x = y;
        y = (x + n / x) >> 1u32;
    }
    x
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_large_operands_do_not_overflow() {
        let Ok(q) = mul_div(u128::MAX, u128::MAX, u128::MAX, Rounding::Down) else {
            panic!("expected Ok");
        };
        assert_eq!(q, u128::MAX);
    }

    #[test]
    fn mul_div_wide_quotient_rejected() {
        let r = mul_div(u128::MAX, 2, 1, Rounding::Down);
        assert!(matches!(r, Err(AmmError::Overflow(_))));
    }

    #[test]
    fn mul_div_rounding() {
        assert_eq!(mul_div(10, 1, 3, Rounding::Down), Ok(3));
        assert_eq!(mul_div(10, 1, 3, Rounding::Up), Ok(4));
        assert_eq!(mul_div(9, 1, 3, Rounding::Up), Ok(3));
    }

    #[test]
    fn mul_div_zero_denominator() {
        assert_eq!(mul_div(1, 1, 0, Rounding::Down), Err(AmmError::DivisionByZero));
    }

    #[test]
    fn isqrt_known_values() {
        assert_eq!(isqrt(U256::ZERO), U256::ZERO);
        assert_eq!(isqrt(U256::ONE), U256::ONE);
        assert_eq!(isqrt(widen(4_000_000)), widen(2_000));
        assert_eq!(isqrt(widen(15)), widen(3));
        assert_eq!(isqrt(widen(16)), widen(4));
    }

    #[test]
    fn isqrt_of_max_square() {
        let m = widen(u128::MAX);
        assert_eq!(isqrt(m * m), m);
        assert_eq!(isqrt(U256::MAX), m);
    }

    #[test]
    fn narrow_rejects_high_word() {
        assert_eq!(narrow(widen(7), "x"), Ok(7));
        assert!(narrow(U256::MAX, "x").is_err());
    }
}
