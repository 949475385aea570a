//! Common types shared across the load value prediction subsystem.
//!
//! 1. **Thread identifiers:** a strong type for the `tid` qualifier.
//! 2. **Error handling:** configuration and capacity error types.

/// Thread-identifier newtype.
pub mod addr;

/// Configuration and capacity error types.
pub mod error;

pub use addr::ThreadId;
pub use error::{CapacityError, ConfigError};
