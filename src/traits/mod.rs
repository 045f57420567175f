//! Seams between the engine and its collaborators.
//!
//! [`ReserveStore`] abstracts where reserves live, [`PriceSink`] where
//! sampled prices go, and [`FromConfig`] how components are built from
//! configuration.

mod from_config;
mod price_sink;
mod reserve_store;

pub use from_config::FromConfig;
pub use price_sink::PriceSink;
pub use reserve_store::ReserveStore;
