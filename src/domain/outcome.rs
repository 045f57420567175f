//! Realized outcomes of committed operations.
//!
//! These are the transfer intents handed to the settlement layer: every
//! amount here has already been applied to the reserves.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Shares, SwapDirection};

/// Outcome of a committed swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapResult {
    direction: SwapDirection,
    input_amount: Amount,
    output_amount: Amount,
    fee_amount: Amount,
}

impl SwapResult {
    pub(crate) const fn new(
        direction: SwapDirection,
        input_amount: Amount,
        output_amount: Amount,
        fee_amount: Amount,
    ) -> Self {
        Self {
            direction,
            input_amount,
            output_amount,
            fee_amount,
        }
    }

    /// Direction of the swap.
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Amount the trader pays in.
    pub const fn input_amount(&self) -> Amount {
        self.input_amount
    }

    /// Amount the trader receives.
    pub const fn output_amount(&self) -> Amount {
        self.output_amount
    }

    /// Fee retained by the pool.
    pub const fn fee_amount(&self) -> Amount {
        self.fee_amount
    }

    /// Input net of fee; `fee_amount + effective_input == input_amount`.
    pub const fn effective_input(&self) -> Amount {
        // fee <= input by construction
        self.input_amount.saturating_sub(&self.fee_amount)
    }
}

impl fmt::Display for SwapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapResult({} in={}, out={}, fee={})",
            self.direction, self.input_amount, self.output_amount, self.fee_amount
        )
    }
}

/// Outcome of a deposit.
///
/// `used_* + refund_* == deposited_*` for each asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityResult {
    /// Shares credited to the provider.
    pub shares_minted: Shares,
    /// Asset A absorbed into the reserves.
    pub used_a: Amount,
    /// Asset B absorbed into the reserves.
    pub used_b: Amount,
    /// Asset A returned to the provider.
    pub refund_a: Amount,
    /// Asset B returned to the provider.
    pub refund_b: Amount,
}

impl fmt::Display for LiquidityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LiquidityResult(minted={}, used=({}, {}), refund=({}, {}))",
            self.shares_minted, self.used_a, self.used_b, self.refund_a, self.refund_b
        )
    }
}

/// Outcome of a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawResult {
    /// Asset A paid out.
    pub amount_a: Amount,
    /// Asset B paid out.
    pub amount_b: Amount,
    /// Shares destroyed.
    pub shares_burned: Shares,
}

impl fmt::Display for WithdrawResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WithdrawResult(a={}, b={}, burned={})",
            self.amount_a, self.amount_b, self.shares_burned
        )
    }
}
