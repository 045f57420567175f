//! Fungible liquidity-share units.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A count of liquidity shares.
///
/// Distinct from [`Amount`](super::Amount): a share is a claim on a
/// fraction of *both* reserves, not a quantity of either asset.
///
/// # Examples
///
/// ```
/// use twinpool::domain::Shares;
///
/// let a = Shares::new(1_000);
/// let b = Shares::new(2_000);
/// assert_eq!(a.checked_add(&b), Some(Shares::new(3_000)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[must_use]
pub struct Shares(u128);

impl Shares {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Shares` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying share count.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if there are no shares.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_ordering() {
        assert!(Shares::ZERO.is_zero());
        assert!(Shares::new(1) > Shares::ZERO);
    }

    #[test]
    fn checked_ops() {
        assert_eq!(Shares::new(u128::MAX).checked_add(&Shares::new(1)), None);
        assert_eq!(Shares::new(3).checked_sub(&Shares::new(4)), None);
        assert_eq!(
            Shares::new(4).checked_sub(&Shares::new(3)),
            Some(Shares::new(1))
        );
    }
}
