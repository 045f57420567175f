//! Snapshot of a pool's reserves, share supply and lifetime statistics.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Shares, SwapDirection};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

/// Lifetime trading statistics of a pool.
///
/// Informational only; nothing in pricing reads these counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoolStats {
    /// Number of committed swaps.
    pub swap_count: u64,
    /// Cumulative swap input denominated in asset A.
    pub volume_a: Amount,
    /// Cumulative swap input denominated in asset B.
    pub volume_b: Amount,
    /// Cumulative fees retained in asset A.
    pub fees_a: Amount,
    /// Cumulative fees retained in asset B.
    pub fees_b: Amount,
}

impl PoolStats {
    /// Returns the stats after one more swap in `direction`.
    ///
    /// Volume counters saturate rather than fail: a statistics overflow
    /// must never block a trade.
    #[must_use]
    pub fn record_swap(&self, direction: SwapDirection, input: Amount, fee: Amount) -> Self {
        let mut next = *self;
        next.swap_count = next.swap_count.saturating_add(1);
        match direction {
            SwapDirection::AToB => {
                next.volume_a = saturating_add(next.volume_a, input);
                next.fees_a = saturating_add(next.fees_a, fee);
            }
            SwapDirection::BToA => {
                next.volume_b = saturating_add(next.volume_b, input);
                next.fees_b = saturating_add(next.fees_b, fee);
            }
        }
        next
    }
}

fn saturating_add(a: Amount, b: Amount) -> Amount {
    a.checked_add(&b).unwrap_or(Amount::MAX)
}

/// Reserves and outstanding shares of one pool instance.
///
/// # Invariants
///
/// A consistent state is either fully empty or fully seeded:
/// `reserve_a > 0 ⇔ reserve_b > 0 ⇔ share_supply > 0`.
/// [`check_consistency`](Self::check_consistency) verifies this before every
/// commit.
///
/// # Examples
///
/// ```
/// use twinpool::domain::{Amount, PoolState, Shares};
///
/// let empty = PoolState::default();
/// assert!(empty.is_empty());
///
/// let seeded = PoolState::new(Amount::new(1_000), Amount::new(4_000), Shares::new(2_000));
/// assert!(seeded.check_consistency().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoolState {
    reserve_a: Amount,
    reserve_b: Amount,
    share_supply: Shares,
    #[serde(default)]
    stats: PoolStats,
}

impl PoolState {
    /// Creates a state with zeroed statistics.
    pub const fn new(reserve_a: Amount, reserve_b: Amount, share_supply: Shares) -> Self {
        Self {
            reserve_a,
            reserve_b,
            share_supply,
            stats: PoolStats {
                swap_count: 0,
                volume_a: Amount::ZERO,
                volume_b: Amount::ZERO,
                fees_a: Amount::ZERO,
                fees_b: Amount::ZERO,
            },
        }
    }

    /// Reserve of asset A.
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Reserve of asset B.
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Total outstanding liquidity shares.
    pub const fn share_supply(&self) -> Shares {
        self.share_supply
    }

    /// Lifetime statistics.
    pub const fn stats(&self) -> &PoolStats {
        &self.stats
    }

    /// Returns `true` if the pool holds no liquidity.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.reserve_a.is_zero() && self.reserve_b.is_zero() && self.share_supply.is_zero()
    }

    /// Returns `(input_reserve, output_reserve)` for a swap in `direction`.
    pub const fn reserves_for(&self, direction: SwapDirection) -> (Amount, Amount) {
        match direction {
            SwapDirection::AToB => (self.reserve_a, self.reserve_b),
            SwapDirection::BToA => (self.reserve_b, self.reserve_a),
        }
    }

    /// Product `reserve_a × reserve_b` in 256-bit space.
    #[must_use]
    pub fn invariant(&self) -> ethnum::U256 {
        crate::math::widen(self.reserve_a.get()) * crate::math::widen(self.reserve_b.get())
    }

    /// Verifies the empty-or-seeded invariant.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::RoundingUnderflow`] if some but not all of the
    /// three balances are zero.
    pub const fn check_consistency(&self) -> crate::error::Result<()> {
        let a = self.reserve_a.is_zero();
        let b = self.reserve_b.is_zero();
        let s = self.share_supply.is_zero();
        if a == b && b == s {
            Ok(())
        } else {
            Err(AmmError::RoundingUnderflow(
                "reserves and share supply must be all zero or all positive",
            ))
        }
    }

    /// Applies a swap: the full `input` joins the input reserve and
    /// `output` leaves the output reserve.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Overflow`] if the input reserve overflows.
    /// - [`AmmError::RoundingUnderflow`] if `output` exceeds the reserve.
    pub fn with_swap(
        &self,
        direction: SwapDirection,
        input: Amount,
        output: Amount,
        fee: Amount,
    ) -> crate::error::Result<Self> {
        let (rin, rout) = self.reserves_for(direction);
        let rin = rin.safe_add(&input)?;
        let rout = rout.safe_sub(&output)?;
        let (reserve_a, reserve_b) = match direction {
            SwapDirection::AToB => (rin, rout),
            SwapDirection::BToA => (rout, rin),
        };
        Ok(Self {
            reserve_a,
            reserve_b,
            share_supply: self.share_supply,
            stats: self.stats.record_swap(direction, input, fee),
        })
    }

    /// Applies a deposit of `(amount_a, amount_b)` minting `shares`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if any balance overflows.
    pub fn with_deposit(
        &self,
        amount_a: Amount,
        amount_b: Amount,
        shares: Shares,
    ) -> crate::error::Result<Self> {
        Ok(Self {
            reserve_a: self.reserve_a.safe_add(&amount_a)?,
            reserve_b: self.reserve_b.safe_add(&amount_b)?,
            share_supply: self.share_supply.safe_add(&shares)?,
            stats: self.stats,
        })
    }

    /// Applies a withdrawal of `(amount_a, amount_b)` burning `shares`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::RoundingUnderflow`] if any balance would go
    /// negative.
    pub fn with_withdrawal(
        &self,
        amount_a: Amount,
        amount_b: Amount,
        shares: Shares,
    ) -> crate::error::Result<Self> {
        Ok(Self {
            reserve_a: self.reserve_a.safe_sub(&amount_a)?,
            reserve_b: self.reserve_b.safe_sub(&amount_b)?,
            share_supply: self.share_supply.safe_sub(&shares)?,
            stats: self.stats,
        })
    }
}

impl fmt::Display for PoolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PoolState(a={}, b={}, shares={})",
            self.reserve_a, self.reserve_b, self.share_supply
        )
    }
}
