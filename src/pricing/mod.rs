//! Pure pricing functions.
//!
//! Nothing here reads or writes pool state on its own: every function takes
//! reserves (or a [`PoolState`](crate::domain::PoolState) snapshot) and
//! returns amounts, so the same code serves off-line quoting and
//! re-validation at execution time.

mod liquidity;
#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;
mod swap;

pub use liquidity::{
    bootstrap_shares, plan_deposit, plan_withdrawal, DepositPlan, WithdrawalPlan,
};
pub use swap::{
    build_quote, minimum_output, price_impact_bps, quote_swap, required_input, spot_price,
    SwapAmounts, FEE_RATE,
};
