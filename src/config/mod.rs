//! Pool configuration.
//!
//! [`PoolConfig`] is the declarative description of a pool: which two
//! assets it trades and the operational limits it enforces.  It is
//! loadable from TOML and always validated before use.

mod pool;

pub use pool::PoolConfig;
