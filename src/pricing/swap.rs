//! Constant-product swap pricing.
//!
//! The curve is `x × y = k`.  The fee is taken from the input **before**
//! the curve is applied and stays in the pool:
//!
//! 1. `fee = floor(amount_in × fee_bps / 10 000)`
//! 2. `net_input = amount_in − fee`
//! 3. `amount_out = floor(reserve_out × net_input / (reserve_in + net_input))`
//!
//! The input reserve later grows by the full `amount_in`, so `k` never
//! decreases.  Every product is formed in 256-bit space.

use ethnum::U256;

use crate::domain::{Amount, BasisPoints, PoolState, Price, Quote, Rounding, SwapDirection, BPS_DENOMINATOR};
use crate::error::AmmError;
use crate::math::{mul_div, mul_div_wide, narrow, widen, CheckedArithmetic};

/// Swap fee charged on every trade (0.30%).
pub const FEE_RATE: BasisPoints = BasisPoints::new(30);

/// Output and fee of a priced swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapAmounts {
    /// Gross input the amounts were computed for.
    pub input_amount: Amount,
    /// Amount leaving the output reserve.
    pub output_amount: Amount,
    /// Part of the input retained as fee.
    pub fee_amount: Amount,
}

impl SwapAmounts {
    /// Input that moved along the curve.
    pub const fn input_after_fee(&self) -> Amount {
        self.input_amount.saturating_sub(&self.fee_amount)
    }
}

const fn require_liquidity(reserve_in: Amount, reserve_out: Amount) -> crate::error::Result<()> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InvalidInput("pool has no liquidity"));
    }
    Ok(())
}

/// Prices an exact-input swap.
///
/// A zero `output_amount` is a valid quote; execution rejects it.
///
/// # Errors
///
/// - [`AmmError::InvalidInput`] if `input_amount` or either reserve is
///   zero, or `fee_rate` exceeds 100%.
/// - [`AmmError::Overflow`] if the output does not fit `u128`.
///
/// # Examples
///
/// ```
/// use twinpool::domain::Amount;
/// use twinpool::pricing::{quote_swap, FEE_RATE};
///
/// let q = quote_swap(
///     Amount::new(10_000),
///     Amount::new(1_000_000),
///     Amount::new(2_000_000),
///     FEE_RATE,
/// )
/// .expect("seeded pool");
/// assert_eq!(q.fee_amount, Amount::new(30));
/// assert_eq!(q.output_amount, Amount::new(19_743));
/// ```
pub fn quote_swap(
    input_amount: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee_rate: BasisPoints,
) -> crate::error::Result<SwapAmounts> {
    if input_amount.is_zero() {
        return Err(AmmError::InvalidInput("input amount must be positive"));
    }
    require_liquidity(reserve_in, reserve_out)?;

    let fee_amount = fee_rate.apply(input_amount, Rounding::Down)?;
    let net_input = input_amount.safe_sub(&fee_amount)?;

    // reserve_in + net_input < 2^129, no overflow in U256
    let denominator = widen(reserve_in.get()) + widen(net_input.get());
    let out = mul_div_wide(
        widen(net_input.get()),
        widen(reserve_out.get()),
        denominator,
        Rounding::Down,
    )?;
    let output_amount = Amount::new(narrow(out, "swap output exceeds u128")?);

    Ok(SwapAmounts {
        input_amount,
        output_amount,
        fee_amount,
    })
}

/// Input required to receive at least `output_amount`.
///
/// Rounded up at both steps so that `quote_swap(required_input(..))`
/// yields an output no smaller than requested.
///
/// # Errors
///
/// - [`AmmError::InvalidInput`] for a zero output, an empty pool, or a
///   100% fee.
/// - [`AmmError::InsufficientLiquidity`] if `output_amount` is not below
///   `reserve_out`.
/// - [`AmmError::Overflow`] if the required input exceeds `u128`.
pub fn required_input(
    output_amount: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee_rate: BasisPoints,
) -> crate::error::Result<Amount> {
    if output_amount.is_zero() {
        return Err(AmmError::InvalidInput("output amount must be positive"));
    }
    require_liquidity(reserve_in, reserve_out)?;
    if output_amount >= reserve_out {
        return Err(AmmError::InsufficientLiquidity(
            "requested output exceeds reserve",
        ));
    }

    let complement = fee_rate.complement()?;
    if complement.get() == 0 {
        return Err(AmmError::InvalidInput("100% fee makes every swap a no-op"));
    }

    // net_in = ceil(reserve_in × out / (reserve_out − out))
    let net_input = mul_div(
        reserve_in.get(),
        output_amount.get(),
        reserve_out.get() - output_amount.get(),
        Rounding::Up,
    )?;
    // in = ceil(net_in × 10 000 / (10 000 − fee))
    let gross = mul_div(
        net_input,
        u128::from(BPS_DENOMINATOR),
        u128::from(complement.get()),
        Rounding::Up,
    )?;
    Ok(Amount::new(gross))
}

/// Price impact of a trade on the fee-less curve, in basis points.
///
/// Spot price is `reserve_out / reserve_in` and the execution price is
/// the exact curve output over `input_amount`; their relative gap reduces
/// to `input / (reserve_in + input)`.  Rounded up, so any non-zero trade
/// reports at least 1bp.  Non-decreasing in `input_amount` and strictly
/// increasing whenever the exact impact grows by at least 1bp.
///
/// # Errors
///
/// Returns [`AmmError::InvalidInput`] if `input_amount` or either reserve
/// is zero.
pub fn price_impact_bps(
    input_amount: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
) -> crate::error::Result<BasisPoints> {
    if input_amount.is_zero() {
        return Err(AmmError::InvalidInput("input amount must be positive"));
    }
    require_liquidity(reserve_in, reserve_out)?;

    let input = widen(input_amount.get());
    let bps = mul_div_wide(
        input,
        U256::new(u128::from(BPS_DENOMINATOR)),
        widen(reserve_in.get()) + input,
        Rounding::Up,
    )?;
    // input / (reserve_in + input) < 1, so bps <= 10_000
    let bps = u32::try_from(narrow(bps, "price impact out of range")?)
        .map_err(|_| AmmError::Overflow("price impact out of range"))?;
    Ok(BasisPoints::new(bps))
}

/// Worst acceptable output under a slippage tolerance.
///
/// `floor(output_amount × (10 000 − tolerance) / 10 000)`.
///
/// # Errors
///
/// Returns [`AmmError::InvalidInput`] if `tolerance` exceeds 100%.
pub fn minimum_output(
    output_amount: Amount,
    tolerance: BasisPoints,
) -> crate::error::Result<Amount> {
    tolerance.complement()?.apply(output_amount, Rounding::Down)
}

/// Spot price of `base` denominated in `quote` (`quote_reserve / base_reserve`).
///
/// # Errors
///
/// - [`AmmError::InvalidInput`] if either reserve is zero.
/// - [`AmmError::Overflow`] if the ratio is outside the fixed-point range.
pub fn spot_price(base_reserve: Amount, quote_reserve: Amount) -> crate::error::Result<Price> {
    require_liquidity(base_reserve, quote_reserve)?;
    Price::from_ratio(quote_reserve, base_reserve)
}

/// Builds a full [`Quote`] for `input_amount` against `state`.
///
/// # Errors
///
/// Propagates the errors of [`quote_swap`], [`price_impact_bps`] and
/// [`minimum_output`].
pub fn build_quote(
    state: &PoolState,
    direction: SwapDirection,
    input_amount: Amount,
    slippage_tolerance: BasisPoints,
) -> crate::error::Result<Quote> {
    let (reserve_in, reserve_out) = state.reserves_for(direction);
    let amounts = quote_swap(input_amount, reserve_in, reserve_out, FEE_RATE)?;
    let impact = price_impact_bps(input_amount, reserve_in, reserve_out)?;
    let floor = minimum_output(amounts.output_amount, slippage_tolerance)?;
    Ok(Quote::new(
        direction,
        input_amount,
        amounts.output_amount,
        amounts.fee_amount,
        impact,
        floor,
        slippage_tolerance,
    ))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Shares;

    fn amt(v: u128) -> Amount {
        Amount::new(v)
    }

    fn quote(input: u128, rin: u128, rout: u128) -> SwapAmounts {
        let Ok(q) = quote_swap(amt(input), amt(rin), amt(rout), FEE_RATE) else {
            panic!("expected Ok");
        };
        q
    }

    // -- quote_swap ---------------------------------------------------------

    #[test]
    fn reference_fixture() {
        // fee = floor(10_000 × 30 / 10_000) = 30
        // out = floor(9_970 × 2_000_000 / (1_000_000 + 9_970)) = 19_743
        let q = quote(10_000, 1_000_000, 2_000_000);
        assert_eq!(q.fee_amount, amt(30));
        assert_eq!(q.input_after_fee(), amt(9_970));
        assert_eq!(q.output_amount, amt(19_743));
    }

    #[test]
    fn fee_rounds_down() {
        // 333 × 30 / 10_000 = 0.999
        assert_eq!(quote(333, 1_000_000, 1_000_000).fee_amount, Amount::ZERO);
        assert_eq!(quote(334, 1_000_000, 1_000_000).fee_amount, amt(1));
    }

    #[test]
    fn dust_input_quotes_zero_output() {
        let q = quote(1, 1_000_000_000, 1);
        assert_eq!(q.output_amount, Amount::ZERO);
    }

    #[test]
    fn zero_input_rejected() {
        let r = quote_swap(Amount::ZERO, amt(1), amt(1), FEE_RATE);
        assert!(matches!(r, Err(AmmError::InvalidInput(_))));
    }

    #[test]
    fn empty_reserves_rejected_not_divided() {
        let r = quote_swap(amt(10), Amount::ZERO, amt(1_000), FEE_RATE);
        assert!(matches!(r, Err(AmmError::InvalidInput(_))));
        let r = quote_swap(amt(10), amt(1_000), Amount::ZERO, FEE_RATE);
        assert!(matches!(r, Err(AmmError::InvalidInput(_))));
    }

    #[test]
    fn zero_fee_has_no_fee() {
        let Ok(q) = quote_swap(amt(1_000), amt(1_000), amt(1_000), BasisPoints::ZERO) else {
            panic!("expected Ok");
        };
        assert_eq!(q.fee_amount, Amount::ZERO);
        assert_eq!(q.output_amount, amt(500));
    }

    #[test]
    fn huge_reserves_do_not_overflow() {
        let big = u128::MAX / 2;
        let q = quote(big, big, big);
        assert!(q.output_amount < amt(big));
        assert!(q.output_amount > Amount::ZERO);
    }

    #[test]
    fn out_of_range_fee_rejected() {
        let r = quote_swap(amt(1), amt(1), amt(1), BasisPoints::new(10_001));
        assert!(r.is_err());
    }

    // -- required_input -----------------------------------------------------

    #[test]
    fn required_input_covers_requested_output() {
        let Ok(input) = required_input(amt(19_743), amt(1_000_000), amt(2_000_000), FEE_RATE) else {
            panic!("expected Ok");
        };
        let q = quote(input.get(), 1_000_000, 2_000_000);
        assert!(q.output_amount >= amt(19_743));
        assert!(input >= amt(10_000));
        assert!(input <= amt(10_002));
    }

    #[test]
    fn required_input_rejects_draining() {
        let r = required_input(amt(1_000), amt(1_000), amt(1_000), FEE_RATE);
        assert!(matches!(r, Err(AmmError::InsufficientLiquidity(_))));
    }

    #[test]
    fn required_input_rejects_total_fee() {
        let r = required_input(amt(1), amt(1_000), amt(1_000), BasisPoints::MAX_PERCENT);
        assert!(matches!(r, Err(AmmError::InvalidInput(_))));
    }

    // -- price_impact_bps ---------------------------------------------------

    #[test]
    fn impact_ladder_is_strictly_increasing() {
        let reserve = amt(1_000_000);
        let expected = [
            (1_000, 10),
            (2_000, 20),
            (5_000, 50),
            (10_000, 100),
            (100_000, 910),
            (1_000_000, 5_000),
        ];
        for (input, bps) in expected {
            let Ok(impact) = price_impact_bps(amt(input), reserve, amt(2_000_000)) else {
                panic!("expected Ok");
            };
            assert_eq!(impact, BasisPoints::new(bps), "input {input}");
        }
    }

    #[test]
    fn impact_never_exceeds_full_range() {
        let Ok(impact) = price_impact_bps(Amount::MAX, amt(1), amt(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(impact, BasisPoints::MAX_PERCENT);
    }

    #[test]
    fn impact_on_empty_pool_rejected() {
        assert!(price_impact_bps(amt(1), Amount::ZERO, amt(1)).is_err());
    }

    // -- minimum_output -----------------------------------------------------

    #[test]
    fn minimum_output_floors() {
        assert_eq!(minimum_output(amt(19_743), BasisPoints::new(50)), Ok(amt(19_644)));
        assert_eq!(minimum_output(amt(100), BasisPoints::ZERO), Ok(amt(100)));
        assert_eq!(minimum_output(amt(100), BasisPoints::MAX_PERCENT), Ok(Amount::ZERO));
        assert!(minimum_output(amt(100), BasisPoints::new(10_001)).is_err());
    }

    // -- spot_price / build_quote -------------------------------------------

    #[test]
    fn spot_price_is_quote_over_base() {
        let Ok(p) = spot_price(amt(1_000_000), amt(2_000_000)) else {
            panic!("expected Ok");
        };
        assert_eq!(p, Price::from_ratio(amt(2), amt(1)).unwrap_or(Price::ZERO));
        assert!(spot_price(Amount::ZERO, amt(1)).is_err());
    }

    #[test]
    fn build_quote_uses_direction() {
        let state = PoolState::new(amt(1_000_000), amt(2_000_000), Shares::new(1_414_213));
        let Ok(q) = build_quote(&state, SwapDirection::AToB, amt(10_000), BasisPoints::new(50))
        else {
            panic!("expected Ok");
        };
        assert_eq!(q.output_amount(), amt(19_743));
        assert_eq!(q.minimum_output(), amt(19_644));
        assert_eq!(q.price_impact_bps(), BasisPoints::new(100));

        let Ok(rev) = build_quote(&state, SwapDirection::BToA, amt(10_000), BasisPoints::ZERO)
        else {
            panic!("expected Ok");
        };
        // 9_970 × 1_000_000 / 2_009_970
        assert_eq!(rev.output_amount(), amt(4_960));
        assert_eq!(rev.minimum_output(), rev.output_amount());
    }
}
