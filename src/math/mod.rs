//! Integer arithmetic utilities for the exchange engine.
//!
//! The engine never uses floating point.  This module provides:
//!
//! - [`CheckedArithmetic`] for overflow-safe domain-type operations,
//! - [`div_round`] for `u128` division with an explicit [`Rounding`](crate::domain::Rounding),
//! - [`mul_div`] / [`mul_div_wide`] and [`isqrt`] over 256-bit intermediates.

mod checked;
mod rounding;
mod wide;

pub use checked::CheckedArithmetic;
pub use rounding::div_round;
pub use wide::{isqrt, mul_div, mul_div_wide, narrow, widen};
