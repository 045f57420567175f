//! Identity of a liquidity provider.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// Opaque identifier of the account that owns liquidity shares.
///
/// The engine never authenticates providers; the caller (the settlement
/// layer) is trusted to pass the identity it has already verified.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderId(String);

impl ProviderId {
    /// Creates a provider identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if the identifier is blank.
    pub fn new(id: impl Into<String>) -> crate::error::Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(AmmError::InvalidInput("provider id is empty"));
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProviderId {
    type Error = AmmError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProviderId> for String {
    fn from(id: ProviderId) -> Self {
        id.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
