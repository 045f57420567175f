//! Identifier of one pooled asset.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// Longest accepted asset code.
const MAX_CODE_LEN: usize = 16;

/// The settlement-layer code of an asset, e.g. `KRW` or `USDT`.
///
/// Codes are 1–16 ASCII alphanumeric characters (plus `-` and `_`) and are
/// stored upper-cased, so `usdt` and `USDT` name the same asset.
///
/// # Examples
///
/// ```
/// use twinpool::domain::AssetId;
///
/// let id = AssetId::new("usdt").expect("valid code");
/// assert_eq!(id.as_str(), "USDT");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetId(String);

impl AssetId {
    /// Validates and normalises an asset code.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if the code is empty, too long,
    /// or contains characters other than ASCII alphanumerics, `-` or `_`.
    pub fn new(code: &str) -> crate::error::Result<Self> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AmmError::InvalidInput("asset code is empty"));
        }
        if code.len() > MAX_CODE_LEN {
            return Err(AmmError::InvalidInput("asset code is too long"));
        }
        if !code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(AmmError::InvalidInput("asset code has invalid characters"));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Returns the normalised code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AssetId {
    type Err = AmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AssetId {
    type Error = AmmError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<AssetId> for String {
    fn from(id: AssetId) -> Self {
        id.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
