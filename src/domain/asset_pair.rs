//! The two assets of a pool and the direction of a swap between them.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::AssetId;
use crate::error::AmmError;

/// Which reserve a swap sells into and which it buys out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapDirection {
    /// Sell asset A, receive asset B.
    AToB,
    /// Sell asset B, receive asset A.
    BToA,
}

impl SwapDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::AToB => Self::BToA,
            Self::BToA => Self::AToB,
        }
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AToB => write!(f, "A->B"),
            Self::BToA => write!(f, "B->A"),
        }
    }
}

/// The ordered pair of assets a pool trades.
///
/// Unlike a sorted token pair, the order is significant: `asset_a` backs
/// `reserve_a` and the spot price is quoted as B per A.
///
/// # Examples
///
/// ```
/// use twinpool::domain::{AssetId, AssetPair, SwapDirection};
///
/// let krw = AssetId::new("KRW").expect("valid");
/// let usdt = AssetId::new("USDT").expect("valid");
/// let pair = AssetPair::new(krw.clone(), usdt.clone()).expect("distinct");
///
/// assert_eq!(pair.direction(&usdt, &krw).expect("in pair"), SwapDirection::BToA);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetPair {
    asset_a: AssetId,
    asset_b: AssetId,
}

impl AssetPair {
    /// Creates a pair, keeping the given order.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if both assets are the same.
    pub fn new(asset_a: AssetId, asset_b: AssetId) -> crate::error::Result<Self> {
        if asset_a == asset_b {
            return Err(AmmError::InvalidInput("pool requires two distinct assets"));
        }
        Ok(Self { asset_a, asset_b })
    }

    /// Returns asset A.
    #[must_use]
    pub const fn asset_a(&self) -> &AssetId {
        &self.asset_a
    }

    /// Returns asset B.
    #[must_use]
    pub const fn asset_b(&self) -> &AssetId {
        &self.asset_b
    }

    /// Returns `true` if `asset` is one of the pair.
    #[must_use]
    pub fn contains(&self, asset: &AssetId) -> bool {
        self.asset_a == *asset || self.asset_b == *asset
    }

    /// Resolves the swap direction for selling `input` to receive `output`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if either asset is not in the
    /// pair or both name the same asset.
    pub fn direction(&self, input: &AssetId, output: &AssetId) -> crate::error::Result<SwapDirection> {
        if !self.contains(input) {
            return Err(AmmError::InvalidInput("input asset is not part of the pool"));
        }
        if !self.contains(output) {
            return Err(AmmError::InvalidInput("output asset is not part of the pool"));
        }
        if input == output {
            return Err(AmmError::InvalidInput("input and output assets are the same"));
        }
        if *input == self.asset_a {
            Ok(SwapDirection::AToB)
        } else {
            Ok(SwapDirection::BToA)
        }
    }

    /// Returns `(input_asset, output_asset)` for a direction.
    #[must_use]
    pub const fn assets_for(&self, direction: SwapDirection) -> (&AssetId, &AssetId) {
        match direction {
            SwapDirection::AToB => (&self.asset_a, &self.asset_b),
            SwapDirection::BToA => (&self.asset_b, &self.asset_a),
        }
    }
}

impl fmt::Display for AssetPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.asset_a, self.asset_b)
    }
}
