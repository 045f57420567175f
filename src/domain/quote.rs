//! Read-only swap quote.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, BasisPoints, SwapDirection};

/// Result of pricing a swap against one snapshot of the reserves.
///
/// A `Quote` is advisory: execution re-derives the output from the live
/// reserves and only honours [`minimum_output`](Self::minimum_output) as
/// the caller's floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    direction: SwapDirection,
    input_amount: Amount,
    output_amount: Amount,
    fee_amount: Amount,
    price_impact: BasisPoints,
    minimum_output: Amount,
    slippage_tolerance: BasisPoints,
}

impl Quote {
    pub(crate) const fn new(
        direction: SwapDirection,
        input_amount: Amount,
        output_amount: Amount,
        fee_amount: Amount,
        price_impact: BasisPoints,
        minimum_output: Amount,
        slippage_tolerance: BasisPoints,
    ) -> Self {
        Self {
            direction,
            input_amount,
            output_amount,
            fee_amount,
            price_impact,
            minimum_output,
            slippage_tolerance,
        }
    }

    /// Direction of the quoted swap.
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Gross input, fee included.
    pub const fn input_amount(&self) -> Amount {
        self.input_amount
    }

    /// Output at the snapshot reserves.
    pub const fn output_amount(&self) -> Amount {
        self.output_amount
    }

    /// Fee retained by the pool.
    pub const fn fee_amount(&self) -> Amount {
        self.fee_amount
    }

    /// Deviation of the execution price from spot.
    pub const fn price_impact_bps(&self) -> BasisPoints {
        self.price_impact
    }

    /// Worst acceptable output after the slippage tolerance.
    pub const fn minimum_output(&self) -> Amount {
        self.minimum_output
    }

    /// Tolerance used to derive [`minimum_output`](Self::minimum_output).
    pub const fn slippage_tolerance(&self) -> BasisPoints {
        self.slippage_tolerance
    }

    /// Returns `true` if executing would be rejected as a no-op.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.output_amount.is_zero()
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quote({} in={} out={} fee={} impact={} min_out={})",
            self.direction,
            self.input_amount,
            self.output_amount,
            self.fee_amount,
            self.price_impact,
            self.minimum_output
        )
    }
}
