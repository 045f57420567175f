//! Liquidity deposits and withdrawals.
//!
//! The [`LiquidityManager`] owns the [`ShareLedger`] and applies the plans
//! from [`pricing`](crate::pricing) to the reserve store.  The ledger lock
//! is held for the whole reserve transaction, so share balances and the
//! pool's share supply move together.
//!
//! The very first deposit sets the pool's exchange rate.  Nothing but
//! arbitrage can correct a mispriced first deposit, so callers seeding a
//! pool should deposit at the market rate.

mod ledger;

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

pub use ledger::ShareLedger;

use crate::domain::{Amount, LiquidityResult, PoolState, ProviderId, Shares, WithdrawResult};
use crate::error::AmmError;
use crate::pricing::{plan_deposit, plan_withdrawal, DepositPlan, WithdrawalPlan};
use crate::store::transact;
use crate::traits::ReserveStore;

/// What to do with the part of a deposit that does not match the pool ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositPolicy {
    /// Charge what the minted shares are worth and hand the rest back.
    #[default]
    RefundExcess,
    /// Reject any deposit that would leave an excess.
    ExactRatio,
}

impl DepositPolicy {
    fn check(self, plan: &DepositPlan) -> crate::error::Result<()> {
        match self {
            Self::ExactRatio if !plan.is_exact() => Err(AmmError::RatioMismatch {
                refund_a: plan.refund_a,
                refund_b: plan.refund_b,
            }),
            _ => Ok(()),
        }
    }
}

fn deposit_result(plan: DepositPlan) -> LiquidityResult {
    LiquidityResult {
        shares_minted: plan.shares,
        used_a: plan.used_a,
        used_b: plan.used_b,
        refund_a: plan.refund_a,
        refund_b: plan.refund_b,
    }
}

const fn withdraw_result(plan: WithdrawalPlan) -> WithdrawResult {
    WithdrawResult {
        amount_a: plan.amount_a,
        amount_b: plan.amount_b,
        shares_burned: plan.shares,
    }
}

fn log_rejection(op: &'static str, e: &AmmError) {
    if e.is_fatal() {
        error!(error = %e, op, "liquidity operation aborted on invariant breach");
    } else {
        warn!(error = %e, op, "liquidity operation rejected");
    }
}

/// Mints and burns liquidity shares against a shared [`ReserveStore`].
#[derive(Debug)]
pub struct LiquidityManager<S> {
    store: Arc<S>,
    ledger: Mutex<ShareLedger>,
    policy: DepositPolicy,
}

impl<S: ReserveStore> LiquidityManager<S> {
    /// Creates a manager with an empty ledger.
    ///
    /// The store is expected to hold an empty pool, or one whose shares are
    /// all accounted for by a ledger restored with
    /// [`with_ledger`](Self::with_ledger).
    #[must_use]
    pub fn new(store: Arc<S>, policy: DepositPolicy) -> Self {
        Self::with_ledger(store, ShareLedger::new(), policy)
    }

    /// Creates a manager around an existing ledger.
    #[must_use]
    pub const fn with_ledger(store: Arc<S>, ledger: ShareLedger, policy: DepositPolicy) -> Self {
        Self {
            store,
            ledger: Mutex::new(ledger),
            policy,
        }
    }

    /// The deposit policy in force.
    pub const fn policy(&self) -> DepositPolicy {
        self.policy
    }

    fn ledger(&self) -> crate::error::Result<MutexGuard<'_, ShareLedger>> {
        self.ledger
            .lock()
            .map_err(|_| AmmError::Storage("share ledger lock poisoned"))
    }

    fn snapshot(&self) -> crate::error::Result<PoolState> {
        self.store.load().map(|v| v.value)
    }

    /// Deposits up to `(amount_a, amount_b)` on behalf of `provider`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if either amount is zero.
    /// - [`AmmError::RatioMismatch`] under [`DepositPolicy::ExactRatio`]
    ///   when the amounts do not match the pool ratio.
    /// - [`AmmError::InvalidInput`] if the deposit would mint no shares.
    /// - [`AmmError::Overflow`] or [`AmmError::Storage`] on infrastructure
    ///   failure.
    #[instrument(skip(self), level = "debug")]
    pub fn add_liquidity(
        &self,
        provider: &ProviderId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> crate::error::Result<LiquidityResult> {
        let mut ledger = self.ledger()?;
        let policy = self.policy;
        let committed = transact(self.store.as_ref(), |state| {
            let plan = plan_deposit(state, amount_a, amount_b)?;
            policy.check(&plan)?;
            let next = state.with_deposit(plan.used_a, plan.used_b, plan.shares)?;
            Ok((next, plan))
        })
        .map_err(|e| {
            log_rejection("add_liquidity", &e);
            e
        })?;

        let plan = committed.output;
        // cannot overflow: the ledger total equals the supply just checked
        ledger.credit(provider, plan.shares)?;
        debug!(
            version = committed.version,
            minted = %plan.shares,
            refund_a = %plan.refund_a,
            refund_b = %plan.refund_b,
            "liquidity added"
        );
        Ok(deposit_result(plan))
    }

    /// Burns `shares` owned by `provider` for a proportional slice of both
    /// reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientShares`] if `shares` is zero or exceeds the
    ///   provider's balance.
    /// - [`AmmError::RoundingUnderflow`] if the withdrawal would leave an
    ///   inconsistent pool.
    /// - [`AmmError::Storage`] on infrastructure failure.
    #[instrument(skip(self), level = "debug")]
    pub fn remove_liquidity(
        &self,
        provider: &ProviderId,
        shares: Shares,
    ) -> crate::error::Result<WithdrawResult> {
        let mut ledger = self.ledger()?;
        ledger.ensure_owned(provider, shares).map_err(|e| {
            log_rejection("remove_liquidity", &e);
            e
        })?;

        let committed = transact(self.store.as_ref(), |state| {
            let plan = plan_withdrawal(state, shares)?;
            let next = state.with_withdrawal(plan.amount_a, plan.amount_b, plan.shares)?;
            Ok((next, plan))
        })
        .map_err(|e| {
            log_rejection("remove_liquidity", &e);
            e
        })?;

        let plan = committed.output;
        ledger.debit(provider, plan.shares)?;
        debug!(
            version = committed.version,
            burned = %plan.shares,
            amount_a = %plan.amount_a,
            amount_b = %plan.amount_b,
            "liquidity removed"
        );
        Ok(withdraw_result(plan))
    }

    /// Prices a deposit against the current reserves without writing.
    ///
    /// # Errors
    ///
    /// Same as [`add_liquidity`](Self::add_liquidity).
    pub fn quote_add_liquidity(
        &self,
        amount_a: Amount,
        amount_b: Amount,
    ) -> crate::error::Result<LiquidityResult> {
        let plan = plan_deposit(&self.snapshot()?, amount_a, amount_b)?;
        self.policy.check(&plan)?;
        Ok(deposit_result(plan))
    }

    /// Prices burning `shares` against the current reserves without writing.
    ///
    /// Ownership is not checked.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientShares`] if `shares` is zero or
    /// exceeds the supply.
    pub fn quote_remove_liquidity(&self, shares: Shares) -> crate::error::Result<WithdrawResult> {
        plan_withdrawal(&self.snapshot()?, shares).map(withdraw_result)
    }

    /// Shares owned by `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Storage`] if the ledger lock is poisoned.
    pub fn shares_of(&self, provider: &ProviderId) -> crate::error::Result<Shares> {
        Ok(self.ledger()?.balance(provider))
    }

    /// Copy of the whole ledger.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Storage`] if the ledger lock is poisoned.
    pub fn ledger_snapshot(&self) -> crate::error::Result<ShareLedger> {
        Ok(self.ledger()?.clone())
    }
}
