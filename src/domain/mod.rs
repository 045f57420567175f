//! Value types of the exchange engine.
//!
//! Every quantity is an integer newtype with checked arithmetic: asset
//! [`Amount`]s, liquidity [`Shares`], fee and slippage [`BasisPoints`].
//! [`Price`] is a deterministic fixed-point ratio used only on the read
//! side.  [`PoolState`] is the aggregate held by the reserve store.

mod amount;
mod asset_id;
mod asset_pair;
mod basis_points;
mod outcome;
mod pool_state;
mod price;
mod price_point;
mod provider_id;
mod quote;
mod rounding;
mod shares;

pub use amount::Amount;
pub use asset_id::AssetId;
pub use asset_pair::{AssetPair, SwapDirection};
pub use basis_points::{BasisPoints, BPS_DENOMINATOR};
pub use outcome::{LiquidityResult, SwapResult, WithdrawResult};
pub use pool_state::{PoolState, PoolStats};
pub use price::Price;
pub use price_point::PricePoint;
pub use provider_id::ProviderId;
pub use quote::Quote;
pub use rounding::Rounding;
pub use shares::Shares;
