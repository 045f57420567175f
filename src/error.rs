//! Unified error types for the exchange engine.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type.  Validation failures are always raised before any reserve
//! mutation, so an `Err` never leaves the pool in an intermediate state.

use thiserror::Error;

use crate::domain::{Amount, Shares};

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Every way an engine operation can fail.
///
/// The first group of variants are user-facing rejections: the caller can
/// correct the request (or re-quote and resubmit) and try again.
/// [`RoundingUnderflow`](Self::RoundingUnderflow) signals an arithmetic or
/// invariant bug and should page someone; see [`is_fatal`](Self::is_fatal).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// A zero amount, an empty pool, an unknown asset, or an out-of-range
    /// rate was supplied.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// A liquidity deposit named a zero amount for one of the assets.
    #[error("zero amount: {0}")]
    ZeroAmount(&'static str),

    /// The swap output rounds down to zero base units.
    #[error("swap output rounds to zero")]
    NoOpSwap,

    /// The output derived from current reserves is below the caller's floor.
    #[error("slippage exceeded: output {actual} is below minimum {minimum}")]
    SlippageExceeded {
        /// Output the pool would actually pay.
        actual: Amount,
        /// Caller's worst acceptable output.
        minimum: Amount,
    },

    /// The swap would push the output reserve below the configured floor.
    #[error("insufficient liquidity: {0}")]
    InsufficientLiquidity(&'static str),

    /// A withdrawal asks for more shares than the provider owns.
    #[error("insufficient shares: requested {requested}, owned {owned}")]
    InsufficientShares {
        /// Shares the caller asked to burn.
        requested: Shares,
        /// Shares the caller actually owns.
        owned: Shares,
    },

    /// An exact-ratio deposit did not match the pool ratio.
    #[error("deposit does not match pool ratio (excess a={refund_a}, b={refund_b})")]
    RatioMismatch {
        /// Excess of asset A that a refunding deposit would return.
        refund_a: Amount,
        /// Excess of asset B that a refunding deposit would return.
        refund_b: Amount,
    },

    /// A reserve or supply invariant was about to be violated.
    #[error("rounding underflow: {0}")]
    RoundingUnderflow(&'static str),

    /// An intermediate or final value does not fit its integer type.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Division by zero in a low-level helper.
    #[error("division by zero")]
    DivisionByZero,

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A configuration document could not be parsed.
    #[error("configuration parse error: {0}")]
    ConfigParse(String),

    /// The reserve store could not be read or written.
    #[error("reserve store unavailable: {0}")]
    Storage(&'static str),

    /// The price history sink could not record a point.
    #[error("price history unavailable: {0}")]
    History(&'static str),
}

impl AmmError {
    /// Returns `true` for errors that indicate a bug rather than a bad
    /// request.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::RoundingUnderflow(_))
    }

    /// Returns `true` if re-quoting against fresh reserves and resubmitting
    /// may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::SlippageExceeded { .. })
    }
}

impl From<toml::de::Error> for AmmError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}
