//! Swap execution against live reserves.
//!
//! A swap is priced again inside the store transaction; a caller's quote is
//! never trusted.  Checks run in a fixed order, all before any write:
//!
//! 1. re-derive output and fee from the current reserves,
//! 2. output below the caller's floor → [`AmmError::SlippageExceeded`],
//! 3. zero output → [`AmmError::NoOpSwap`],
//! 4. output reserve pushed below the minimum → [`AmmError::InsufficientLiquidity`],
//! 5. commit `reserve_in += input`, `reserve_out −= output`.

use std::sync::Arc;

use tracing::{debug, error, instrument, warn};

use crate::domain::{Amount, BasisPoints, PoolState, Quote, SwapDirection, SwapResult};
use crate::error::AmmError;
use crate::pricing::{build_quote, quote_swap, FEE_RATE};
use crate::store::transact;
use crate::traits::ReserveStore;

/// Derives the post-swap state from `state`.
///
/// Pure; [`SwapExecutor::execute`] runs it inside the store transaction.
///
/// # Errors
///
/// - [`AmmError::InvalidInput`] for a zero input or an empty pool.
/// - [`AmmError::SlippageExceeded`] if the output is below `minimum_output`.
/// - [`AmmError::NoOpSwap`] if the output rounds to zero.
/// - [`AmmError::InsufficientLiquidity`] if the output reserve would drop
///   below `minimum_reserve`.
/// - [`AmmError::RoundingUnderflow`] if the constant product would shrink.
pub fn plan_swap(
    state: &PoolState,
    direction: SwapDirection,
    input_amount: Amount,
    minimum_output: Amount,
    minimum_reserve: Amount,
) -> crate::error::Result<(PoolState, SwapResult)> {
    let (reserve_in, reserve_out) = state.reserves_for(direction);
    let priced = quote_swap(input_amount, reserve_in, reserve_out, FEE_RATE)?;
    let output = priced.output_amount;

    if output < minimum_output {
        return Err(AmmError::SlippageExceeded {
            actual: output,
            minimum: minimum_output,
        });
    }
    if output.is_zero() {
        return Err(AmmError::NoOpSwap);
    }
    let remaining = reserve_out.saturating_sub(&output);
    if output >= reserve_out || remaining < minimum_reserve {
        return Err(AmmError::InsufficientLiquidity(
            "swap would breach the minimum reserve",
        ));
    }

    let next = state.with_swap(direction, input_amount, output, priced.fee_amount)?;
    if next.invariant() < state.invariant() {
        return Err(AmmError::RoundingUnderflow("constant product decreased"));
    }
    Ok((
        next,
        SwapResult::new(direction, input_amount, output, priced.fee_amount),
    ))
}

/// Executes swaps against a shared [`ReserveStore`].
#[derive(Debug)]
pub struct SwapExecutor<S> {
    store: Arc<S>,
    minimum_reserve: Amount,
}

impl<S: ReserveStore> SwapExecutor<S> {
    /// Creates an executor that never drains an output reserve below
    /// `minimum_reserve`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `minimum_reserve` is zero.
    pub fn new(store: Arc<S>, minimum_reserve: Amount) -> crate::error::Result<Self> {
        if minimum_reserve.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "minimum reserve must be positive",
            ));
        }
        Ok(Self {
            store,
            minimum_reserve,
        })
    }

    /// The reserve floor enforced on every swap.
    pub const fn minimum_reserve(&self) -> Amount {
        self.minimum_reserve
    }

    /// Quotes a swap against one snapshot without writing anything.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`build_quote`] and the store.
    pub fn quote(
        &self,
        direction: SwapDirection,
        input_amount: Amount,
        slippage_tolerance: BasisPoints,
    ) -> crate::error::Result<Quote> {
        let snapshot = self.store.load()?;
        build_quote(&snapshot.value, direction, input_amount, slippage_tolerance)
    }

    /// Executes an exact-input swap if it still pays at least
    /// `minimum_output`.
    ///
    /// # Errors
    ///
    /// See [`plan_swap`]; storage failures surface as
    /// [`AmmError::Storage`].  On any error the reserves are untouched.
    #[instrument(skip(self), level = "debug")]
    pub fn execute(
        &self,
        direction: SwapDirection,
        input_amount: Amount,
        minimum_output: Amount,
    ) -> crate::error::Result<SwapResult> {
        let minimum_reserve = self.minimum_reserve;
        match transact(self.store.as_ref(), |state| {
            plan_swap(state, direction, input_amount, minimum_output, minimum_reserve)
        }) {
            Ok(committed) => {
                let result = committed.output;
                debug!(
                    version = committed.version,
                    output = %result.output_amount(),
                    fee = %result.fee_amount(),
                    "swap committed"
                );
                Ok(result)
            }
            Err(e) if e.is_fatal() => {
                error!(error = %e, "swap aborted on invariant breach");
                Err(e)
            }
            Err(e) => {
                warn!(error = %e, "swap rejected");
                Err(e)
            }
        }
    }
}
