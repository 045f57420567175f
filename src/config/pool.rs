//! Configuration of one exchange pool.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::{Amount, AssetId, AssetPair, BasisPoints};
use crate::error::AmmError;
use crate::liquidity::DepositPolicy;

const fn default_minimum_reserve() -> Amount {
    Amount::new(1)
}

const fn default_slippage() -> BasisPoints {
    BasisPoints::new(50)
}

const fn default_history_capacity() -> usize {
    2016
}

/// TOML integers are 64-bit, so the reserve floor travels as a `u64`.
mod base_units {
    use serde::ser::Error as _;

    use super::{Amount, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
        let units = u64::try_from(amount.get())
            .map_err(|_| S::Error::custom("amount does not fit in 64 bits"))?;
        serializer.serialize_u64(units)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
        u64::deserialize(deserializer).map(Amount::from)
    }
}

/// Parameters of a two-asset pool.
///
/// The swap fee is not part of the configuration: every pool charges
/// [`FEE_RATE`](crate::pricing::FEE_RATE).
///
/// # Validation
///
/// - `asset_a` and `asset_b` must differ.
/// - `minimum_reserve` must be positive and fit in 64 bits.
/// - `default_slippage_bps` must not exceed 10 000.
/// - `history_capacity` must be positive.
///
/// # Examples
///
/// ```
/// use twinpool::config::PoolConfig;
///
/// let cfg = PoolConfig::from_toml_str(r#"
///     asset_a = "usdc"
///     asset_b = "eurc"
///     default_slippage_bps = 100
/// "#).expect("valid config");
/// assert_eq!(cfg.asset_a().as_str(), "USDC");
/// assert_eq!(cfg.default_slippage().get(), 100);
/// assert_eq!(cfg.minimum_reserve().get(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoolConfig {
    asset_a: AssetId,
    asset_b: AssetId,
    #[serde(default = "default_minimum_reserve", with = "base_units")]
    minimum_reserve: Amount,
    #[serde(default = "default_slippage", rename = "default_slippage_bps")]
    default_slippage: BasisPoints,
    #[serde(default)]
    deposit_policy: DepositPolicy,
    #[serde(default = "default_history_capacity")]
    history_capacity: usize,
}

impl PoolConfig {
    /// Creates a config for `asset_a`/`asset_b` with default parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the assets are equal.
    pub fn new(asset_a: AssetId, asset_b: AssetId) -> crate::error::Result<Self> {
        let config = Self {
            asset_a,
            asset_b,
            minimum_reserve: default_minimum_reserve(),
            default_slippage: default_slippage(),
            deposit_policy: DepositPolicy::default(),
            history_capacity: default_history_capacity(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ConfigParse`] if the document is malformed.
    /// - [`AmmError::InvalidConfiguration`] if a value is out of range.
    pub fn from_toml_str(source: &str) -> crate::error::Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] naming the first violated
    /// constraint.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.asset_a == self.asset_b {
            return Err(AmmError::InvalidConfiguration("pool assets must differ"));
        }
        if self.minimum_reserve.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "minimum_reserve must be positive",
            ));
        }
        if self.minimum_reserve.get() > u128::from(u64::MAX) {
            return Err(AmmError::InvalidConfiguration(
                "minimum_reserve must fit in 64 bits",
            ));
        }
        if !self.default_slippage.is_valid_percent() {
            return Err(AmmError::InvalidConfiguration(
                "default_slippage_bps must not exceed 10000",
            ));
        }
        if self.history_capacity == 0 {
            return Err(AmmError::InvalidConfiguration(
                "history_capacity must be positive",
            ));
        }
        Ok(())
    }

    /// Sets the reserve floor.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the result is invalid.
    pub fn with_minimum_reserve(mut self, minimum_reserve: Amount) -> crate::error::Result<Self> {
        self.minimum_reserve = minimum_reserve;
        self.validate()?;
        Ok(self)
    }

    /// Sets the default slippage tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the result is invalid.
    pub fn with_default_slippage(mut self, tolerance: BasisPoints) -> crate::error::Result<Self> {
        self.default_slippage = tolerance;
        self.validate()?;
        Ok(self)
    }

    /// Sets the deposit policy.
    #[must_use]
    pub fn with_deposit_policy(mut self, policy: DepositPolicy) -> Self {
        self.deposit_policy = policy;
        self
    }

    /// Sets the history length.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the result is invalid.
    pub fn with_history_capacity(mut self, capacity: usize) -> crate::error::Result<Self> {
        self.history_capacity = capacity;
        self.validate()?;
        Ok(self)
    }

    /// First asset.
    #[must_use]
    pub const fn asset_a(&self) -> &AssetId {
        &self.asset_a
    }

    /// Second asset.
    #[must_use]
    pub const fn asset_b(&self) -> &AssetId {
        &self.asset_b
    }

    /// The ordered asset pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if the assets are equal.
    pub fn pair(&self) -> crate::error::Result<AssetPair> {
        AssetPair::new(self.asset_a.clone(), self.asset_b.clone())
    }

    /// Reserve floor enforced on every swap.
    pub const fn minimum_reserve(&self) -> Amount {
        self.minimum_reserve
    }

    /// Tolerance applied to quotes that do not name one.
    pub const fn default_slippage(&self) -> BasisPoints {
        self.default_slippage
    }

    /// Handling of deposits off the pool ratio.
    pub const fn deposit_policy(&self) -> DepositPolicy {
        self.deposit_policy
    }

    /// Number of price points kept in memory.
    #[must_use]
    pub const fn history_capacity(&self) -> usize {
        self.history_capacity
    }
}
