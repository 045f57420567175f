//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use twinpool::prelude::*;
//! ```

pub use crate::config::PoolConfig;
pub use crate::domain::{
    Amount, AssetId, AssetPair, BasisPoints, LiquidityResult, PoolState, Price, PricePoint,
    ProviderId, Quote, Rounding, Shares, SwapDirection, SwapResult, WithdrawResult,
};
pub use crate::engine::ExchangeEngine;
pub use crate::error::{AmmError, Result};
pub use crate::liquidity::DepositPolicy;
pub use crate::math::CheckedArithmetic;
pub use crate::pricing::FEE_RATE;
pub use crate::traits::{FromConfig, PriceSink, ReserveStore};
