//! Construction from a validated configuration.
//!
//! [`FromConfig`] is the uniform way to build a component from its config
//! struct.  Implementations **must** run the config's own validation before
//! building anything, so a successfully constructed value is always in a
//! valid initial state.
//!
//! There is no blanket implementation: every component/config pairing is
//! written out explicitly.

use crate::error::AmmError;

/// Builds `Self` from a configuration of type `C`.
///
/// # Implementors
///
/// - `impl FromConfig<PoolConfig> for ExchangeEngine`
pub trait FromConfig<C> {
    /// Creates a new instance from `config`.
    ///
    /// The configuration is borrowed so callers can keep it for logging or
    /// for building further instances.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if a parameter is out of range.
    /// - [`AmmError::InvalidInput`] if the asset pair is invalid.
    fn from_config(config: &C) -> Result<Self, AmmError>
    where
        Self: Sized;
}
