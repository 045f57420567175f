//! Per-provider share balances.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{ProviderId, Shares};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

/// Share balance of every liquidity provider.
///
/// The sum of all balances equals the pool's share supply whenever the
/// owning [`LiquidityManager`](super::LiquidityManager) is not mid-operation.
/// Providers whose balance reaches zero are removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLedger {
    holdings: HashMap<ProviderId, Shares>,
}

impl ShareLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shares owned by `provider` (zero if unknown).
    pub fn balance(&self, provider: &ProviderId) -> Shares {
        self.holdings.get(provider).copied().unwrap_or(Shares::ZERO)
    }

    /// Sum of all balances.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the sum exceeds `u128`.
    pub fn total(&self) -> crate::error::Result<Shares> {
        self.holdings
            .values()
            .try_fold(Shares::ZERO, |acc, s| acc.safe_add(s))
    }

    /// Number of providers with a non-zero balance.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    /// Returns `true` if nobody holds shares.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Iterates over `(provider, balance)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProviderId, &Shares)> {
        self.holdings.iter()
    }

    /// Adds `shares` to `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the balance overflows.
    pub fn credit(&mut self, provider: &ProviderId, shares: Shares) -> crate::error::Result<()> {
        if shares.is_zero() {
            return Ok(());
        }
        let next = self.balance(provider).safe_add(&shares)?;
        self.holdings.insert(provider.clone(), next);
        Ok(())
    }

    /// Removes `shares` from `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientShares`] if `shares` is zero or
    /// exceeds the balance.
    pub fn debit(&mut self, provider: &ProviderId, shares: Shares) -> crate::error::Result<()> {
        let owned = self.ensure_owned(provider, shares)?;
        let rest = owned.safe_sub(&shares)?;
        if rest.is_zero() {
            self.holdings.remove(provider);
        } else {
            self.holdings.insert(provider.clone(), rest);
        }
        Ok(())
    }

    /// Checks that `provider` can burn `shares`, returning the balance.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientShares`] if `shares` is zero or
    /// exceeds the balance.
    pub fn ensure_owned(
        &self,
        provider: &ProviderId,
        shares: Shares,
    ) -> crate::error::Result<Shares> {
        let owned = self.balance(provider);
        if shares.is_zero() || shares > owned {
            return Err(AmmError::InsufficientShares {
                requested: shares,
                owned,
            });
        }
        Ok(owned)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn alice() -> ProviderId {
        let Ok(id) = ProviderId::new("alice") else {
            panic!("valid id");
        };
        id
    }

    fn bob() -> ProviderId {
        let Ok(id) = ProviderId::new("bob") else {
            panic!("valid id");
        };
        id
    }

    #[test]
    fn credit_and_debit() {
        let mut ledger = ShareLedger::new();
        assert!(ledger.credit(&alice(), Shares::new(10)).is_ok());
        assert!(ledger.credit(&alice(), Shares::new(5)).is_ok());
        assert!(ledger.credit(&bob(), Shares::new(1)).is_ok());
        assert_eq!(ledger.balance(&alice()), Shares::new(15));
        assert_eq!(ledger.total(), Ok(Shares::new(16)));

        assert!(ledger.debit(&alice(), Shares::new(15)).is_ok());
        assert_eq!(ledger.balance(&alice()), Shares::ZERO);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn overdraw_rejected() {
        let mut ledger = ShareLedger::new();
        assert!(ledger.credit(&alice(), Shares::new(3)).is_ok());
        assert_eq!(
            ledger.debit(&alice(), Shares::new(4)),
            Err(AmmError::InsufficientShares {
                requested: Shares::new(4),
                owned: Shares::new(3),
            })
        );
        assert!(ledger.debit(&bob(), Shares::new(1)).is_err());
        assert!(ledger.debit(&alice(), Shares::ZERO).is_err());
        assert_eq!(ledger.balance(&alice()), Shares::new(3));
    }

    #[test]
    fn zero_credit_leaves_no_entry() {
        let mut ledger = ShareLedger::new();
        assert!(ledger.credit(&alice(), Shares::ZERO).is_ok());
        assert!(ledger.is_empty());
    }
}
