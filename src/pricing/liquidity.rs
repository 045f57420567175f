//! Share minting and burning formulas.
//!
//! The first deposit fixes the exchange rate and mints
//! `floor(sqrt(amount_a × amount_b))` shares.  Later deposits mint shares
//! proportionally to the supply, pay exactly what those shares are worth
//! (rounded up), and get the remainder of both sides refunded.  Withdrawals pay out
//! `floor(reserve × shares / supply)` of each asset.

use crate::domain::{Amount, PoolState, Rounding, Shares};
use crate::error::AmmError;
use crate::math::{isqrt, mul_div, mul_div_wide, narrow, widen};

/// Amounts absorbed, refunded and minted by a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositPlan {
    /// Asset A moved into the reserves.
    pub used_a: Amount,
    /// Asset B moved into the reserves.
    pub used_b: Amount,
    /// Asset A handed back to the provider.
    pub refund_a: Amount,
    /// Asset B handed back to the provider.
    pub refund_b: Amount,
    /// Shares to mint.
    pub shares: Shares,
}

impl DepositPlan {
    /// Returns `true` if the deposit matched the pool ratio exactly.
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        self.refund_a.is_zero() && self.refund_b.is_zero()
    }
}

/// Amounts paid out by burning shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawalPlan {
    /// Asset A paid out.
    pub amount_a: Amount,
    /// Asset B paid out.
    pub amount_b: Amount,
    /// Shares burned.
    pub shares: Shares,
}

/// Shares minted by the first deposit into an empty pool.
///
/// # Errors
///
/// Returns [`AmmError::ZeroAmount`] if either amount is zero.
///
/// # Examples
///
/// ```
/// use twinpool::domain::{Amount, Shares};
/// use twinpool::pricing::bootstrap_shares;
///
/// assert_eq!(bootstrap_shares(Amount::new(1_000), Amount::new(4_000)), Ok(Shares::new(2_000)));
/// ```
pub fn bootstrap_shares(amount_a: Amount, amount_b: Amount) -> crate::error::Result<Shares> {
    if amount_a.is_zero() || amount_b.is_zero() {
        return Err(AmmError::ZeroAmount("deposit amounts must be positive"));
    }
    // sqrt of a u256 product of two u128 values always fits u128
    let root = isqrt(widen(amount_a.get()) * widen(amount_b.get()));
    narrow(root, "bootstrap share overflow").map(Shares::new)
}

/// Plans a deposit of up to `(amount_a, amount_b)` into `state`.
///
/// For a seeded pool the shares are fixed first, by whichever side buys
/// fewer of them.  Each side then pays `ceil(shares × reserve / supply)`
/// and the rest is refunded, so no unit is absorbed without shares backing
/// it and withdrawing the minted shares returns each asset within one base
/// unit.
///
/// # Errors
///
/// - [`AmmError::ZeroAmount`] if either amount is zero.
/// - [`AmmError::InvalidInput`] if the deposit is too small to mint a share.
/// - [`AmmError::RoundingUnderflow`] if `state` is inconsistent.
/// - [`AmmError::Overflow`] if the minted shares exceed the range.
pub fn plan_deposit(
    state: &PoolState,
    amount_a: Amount,
    amount_b: Amount,
) -> crate::error::Result<DepositPlan> {
    if amount_a.is_zero() || amount_b.is_zero() {
        return Err(AmmError::ZeroAmount("deposit amounts must be positive"));
    }
    state.check_consistency()?;

    if state.is_empty() {
        return Ok(DepositPlan {
            used_a: amount_a,
            used_b: amount_b,
            refund_a: Amount::ZERO,
            refund_b: Amount::ZERO,
            shares: bootstrap_shares(amount_a, amount_b)?,
        });
    }

    let (ra, rb) = (state.reserve_a().get(), state.reserve_b().get());
    let supply = state.share_supply().get();

    // either quotient may exceed u128 on its own; only the smaller must fit
    let by_a = mul_div_wide(widen(amount_a.get()), widen(supply), widen(ra), Rounding::Down)?;
    let by_b = mul_div_wide(widen(amount_b.get()), widen(supply), widen(rb), Rounding::Down)?;
    let shares = narrow(by_a.min(by_b), "minted share overflow")?;
    if shares == 0 {
        return Err(AmmError::InvalidInput("deposit too small to mint shares"));
    }

    // shares <= amount × supply / reserve, hence used <= amount
    let used_a = mul_div(shares, ra, supply, Rounding::Up)?;
    let used_b = mul_div(shares, rb, supply, Rounding::Up)?;

    Ok(DepositPlan {
        used_a: Amount::new(used_a),
        used_b: Amount::new(used_b),
        refund_a: Amount::new(amount_a.get() - used_a),
        refund_b: Amount::new(amount_b.get() - used_b),
        shares: Shares::new(shares),
    })
}

/// Plans burning `shares` out of the pool's supply.
///
/// Burning the whole supply pays out the reserves exactly.
///
/// # Errors
///
/// Returns [`AmmError::InsufficientShares`] if `shares` is zero or exceeds
/// the supply.
pub fn plan_withdrawal(state: &PoolState, shares: Shares) -> crate::error::Result<WithdrawalPlan> {
    let supply = state.share_supply();
    if shares.is_zero() || shares > supply {
        return Err(AmmError::InsufficientShares {
            requested: shares,
            owned: supply,
        });
    }
    let amount_a = mul_div(state.reserve_a().get(), shares.get(), supply.get(), Rounding::Down)?;
    let amount_b = mul_div(state.reserve_b().get(), shares.get(), supply.get(), Rounding::Down)?;
    Ok(WithdrawalPlan {
        amount_a: Amount::new(amount_a),
        amount_b: Amount::new(amount_b),
        shares,
    })
}
