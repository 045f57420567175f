//! Property-based tests for the pricing formulas and the swap executor.
//!
//! 1. **Non-decreasing product** across any sequence of swaps.
//! 2. **Fee conservation**: `input = fee + net input`, and the input
//!    reserve grows by exactly `input`.
//! 3. **Monotonic impact**: larger trades never report less impact.
//! 4. **Slippage enforcement**: a floor above the live output is rejected
//!    and leaves the reserves untouched.
//! 5. **Liquidity round trip**: deposit then withdraw never pays out more
//!    than was absorbed and loses at most one base unit per asset.
//! 6. **Share proportionality**: withdrawals pay `floor(reserve × s / S)`,
//!    and splitting a withdrawal never pays more.

use std::sync::Arc;

use proptest::prelude::*;

use super::{
    bootstrap_shares, plan_deposit, plan_withdrawal, price_impact_bps, quote_swap,
    required_input, FEE_RATE,
};
use crate::domain::{Amount, PoolState, Shares, SwapDirection};
use crate::error::AmmError;
use crate::executor::{plan_swap, SwapExecutor};
use crate::store::InMemoryReserveStore;
use crate::traits::ReserveStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn seeded(ra: u128, rb: u128) -> PoolState {
    let Ok(plan) = plan_deposit(&PoolState::default(), Amount::new(ra), Amount::new(rb)) else {
        panic!("valid bootstrap");
    };
    let Ok(state) = PoolState::default().with_deposit(plan.used_a, plan.used_b, plan.shares)
    else {
        panic!("valid deposit");
    };
    state
}

fn direction(flag: bool) -> SwapDirection {
    if flag {
        SwapDirection::AToB
    } else {
        SwapDirection::BToA
    }
}

/// Applies `swaps` in order, skipping the ones the executor would reject.
fn trade(mut state: PoolState, swaps: &[(bool, u128)]) -> PoolState {
    for &(flag, amount) in swaps {
        if let Ok((next, _)) = plan_swap(
            &state,
            direction(flag),
            Amount::new(amount),
            Amount::ZERO,
            Amount::new(1),
        ) {
            state = next;
        }
    }
    state
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Reserves in [10_000, 10^12].
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=1_000_000_000_000u128
}

fn input_strategy() -> impl Strategy<Value = u128> {
    1u128..=1_000_000_000u128
}

fn swaps_strategy() -> impl Strategy<Value = Vec<(bool, u128)>> {
    prop::collection::vec((any::<bool>(), input_strategy()), 0..12)
}

// ---------------------------------------------------------------------------
// Properties 1 & 2: product and conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_product_never_decreases(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        swaps in swaps_strategy(),
    ) {
        let mut state = seeded(ra, rb);
        for (flag, amount) in swaps {
            let Ok((next, _)) = plan_swap(
                &state,
                direction(flag),
                Amount::new(amount),
                Amount::ZERO,
                Amount::new(1),
            ) else {
                continue;
            };
            prop_assert!(
                next.invariant() >= state.invariant(),
                "k decreased: {} -> {}", state, next
            );
            state = next;
        }
    }

    #[test]
    fn prop_fee_conservation(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        input in input_strategy(),
        flag in any::<bool>(),
    ) {
        let state = seeded(ra, rb);
        let dir = direction(flag);
        let Ok((next, result)) = plan_swap(&state, dir, Amount::new(input), Amount::ZERO, Amount::new(1))
        else {
            return Ok(());
        };
        prop_assert_eq!(
            result.fee_amount().get() + result.effective_input().get(),
            input
        );
        let (rin_before, rout_before) = state.reserves_for(dir);
        let (rin_after, rout_after) = next.reserves_for(dir);
        prop_assert_eq!(rin_after.get() - rin_before.get(), input);
        prop_assert_eq!(rout_before.get() - rout_after.get(), result.output_amount().get());
        prop_assert_eq!(next.share_supply(), state.share_supply());
    }
}

// ---------------------------------------------------------------------------
// Property 3: monotonic impact
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_impact_monotonic(
        reserve in reserve_strategy(),
        x in input_strategy(),
        y in input_strategy(),
    ) {
        let (small, large) = if x <= y { (x, y) } else { (y, x) };
        let r = Amount::new(reserve);
        let Ok(low) = price_impact_bps(Amount::new(small), r, r) else {
            panic!("valid impact");
        };
        let Ok(high) = price_impact_bps(Amount::new(large), r, r) else {
            panic!("valid impact");
        };
        prop_assert!(low <= high, "impact fell: {} -> {}", low, high);

        // strict once the exact impact grows by at least 1bp:
        // large/(r+large) - small/(r+small) >= 1/10_000
        if 10_000 * reserve * (large - small) >= (reserve + small) * (reserve + large) {
            prop_assert!(low < high, "impact flat: {} -> {}", low, high);
        }
    }

    #[test]
    fn prop_required_input_buys_requested_output(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        want_frac in 1u128..=500u128,
    ) {
        // up to 5% of the output reserve
        let want = (rb * want_frac / 10_000).max(1);
        let Ok(input) = required_input(Amount::new(want), Amount::new(ra), Amount::new(rb), FEE_RATE)
        else {
            panic!("valid exact-out quote");
        };
        let Ok(got) = quote_swap(input, Amount::new(ra), Amount::new(rb), FEE_RATE) else {
            panic!("valid quote");
        };
        prop_assert!(got.output_amount.get() >= want);
    }
}

// ---------------------------------------------------------------------------
// Property 4: slippage enforcement through the executor
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_slippage_floor_above_output_rejected(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        input in input_strategy(),
        excess in 1u128..=1_000u128,
        flag in any::<bool>(),
    ) {
        let state = seeded(ra, rb);
        let dir = direction(flag);
        let (rin, rout) = state.reserves_for(dir);
        let Ok(priced) = quote_swap(Amount::new(input), rin, rout, FEE_RATE) else {
            panic!("valid quote");
        };
        let store = Arc::new(InMemoryReserveStore::new(state));
        let Ok(exec) = SwapExecutor::new(Arc::clone(&store), Amount::new(1)) else {
            panic!("valid executor");
        };

        let floor = Amount::new(priced.output_amount.get() + excess);
        let r = exec.execute(dir, Amount::new(input), floor);
        prop_assert_eq!(
            r,
            Err(AmmError::SlippageExceeded { actual: priced.output_amount, minimum: floor })
        );
        let Ok(after) = store.load() else {
            panic!("readable store");
        };
        prop_assert_eq!(after.value, state);
        prop_assert_eq!(after.version, 0);
    }
}

// ---------------------------------------------------------------------------
// Properties 5 & 6: liquidity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_bootstrap_round_trip_is_exact(
        a in reserve_strategy(),
        b in reserve_strategy(),
    ) {
        let state = seeded(a, b);
        let Ok(minted) = bootstrap_shares(Amount::new(a), Amount::new(b)) else {
            panic!("valid bootstrap");
        };
        let Ok(out) = plan_withdrawal(&state, minted) else {
            panic!("valid withdrawal");
        };
        prop_assert_eq!(out.amount_a.get(), a);
        prop_assert_eq!(out.amount_b.get(), b);
    }

    #[test]
    fn prop_deposit_round_trip_within_one_unit(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        swaps in swaps_strategy(),
        a in input_strategy(),
        b in input_strategy(),
    ) {
        let state = trade(seeded(ra, rb), &swaps);
        let Ok(plan) = plan_deposit(&state, Amount::new(a), Amount::new(b)) else {
            return Ok(());
        };
        prop_assert_eq!(plan.used_a.get() + plan.refund_a.get(), a);
        prop_assert_eq!(plan.used_b.get() + plan.refund_b.get(), b);

        let Ok(after) = state.with_deposit(plan.used_a, plan.used_b, plan.shares) else {
            panic!("valid deposit");
        };
        let Ok(out) = plan_withdrawal(&after, plan.shares) else {
            panic!("valid withdrawal");
        };
        prop_assert!(out.amount_a <= plan.used_a);
        prop_assert!(out.amount_b <= plan.used_b);

        // deposited = withdrawn + refunded, up to one unit per asset
        prop_assert!(a - (out.amount_a.get() + plan.refund_a.get()) <= 1);
        prop_assert!(b - (out.amount_b.get() + plan.refund_b.get()) <= 1);
    }

    #[test]
    fn prop_withdrawal_proportional(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        swaps in swaps_strategy(),
        frac in 1u128..=10_000u128,
        split in 1u128..=9_999u128,
    ) {
        let state = trade(seeded(ra, rb), &swaps);
        let supply = state.share_supply().get();
        let s = (supply * frac / 10_000).max(1);
        let Ok(out) = plan_withdrawal(&state, Shares::new(s)) else {
            panic!("valid withdrawal");
        };
        prop_assert_eq!(out.amount_a.get(), state.reserve_a().get() * s / supply);
        prop_assert_eq!(out.amount_b.get(), state.reserve_b().get() * s / supply);

        // burning in two steps never beats burning at once
        let first = (s * split / 10_000).max(1);
        if first >= s {
            return Ok(());
        }
        let Ok(p1) = plan_withdrawal(&state, Shares::new(first)) else {
            panic!("valid withdrawal");
        };
        let Ok(mid) = state.with_withdrawal(p1.amount_a, p1.amount_b, p1.shares) else {
            panic!("valid state");
        };
        let Ok(p2) = plan_withdrawal(&mid, Shares::new(s - first)) else {
            panic!("valid withdrawal");
        };
        prop_assert!(p1.amount_a.get() + p2.amount_a.get() <= out.amount_a.get());
        prop_assert!(p1.amount_b.get() + p2.amount_b.get() <= out.amount_b.get());
    }
}
