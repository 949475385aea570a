//! Error types for configuration and capacity failures.
//!
//! This module defines the two error surfaces the subsystem exposes:
//! 1. **Configuration errors:** fatal, construction-time parameter validation.
//! 2. **Capacity errors:** recoverable backpressure when a lookaside structure is full.

use thiserror::Error;

/// Fatal configuration error, returned from fallible table/unit constructors.
///
/// Every variant names the offending parameter so the host can produce a
/// diagnostic without re-deriving which constructor argument was at fault.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A table size that is required to be a power of two was not.
    #[error("{param} must be a power of two, got {value}")]
    NotPowerOfTwo {
        /// Name of the offending constructor parameter.
        param: &'static str,
        /// The invalid value supplied.
        value: usize,
    },

    /// A size or width parameter was zero where at least one is required.
    #[error("{param} must be at least 1, got 0")]
    Zero {
        /// Name of the offending constructor parameter.
        param: &'static str,
    },

    /// A saturating counter width fell outside the representable range.
    #[error("counter width must be between 1 and 8 bits, got {width}")]
    CounterWidthOutOfRange {
        /// The invalid width supplied, in bits.
        width: u8,
    },
}

/// Recoverable capacity exhaustion from a fixed-size lookaside structure.
///
/// Unlike [`ConfigError`], this is not a programmer error: it is ordinary
/// backpressure the host is expected to react to (e.g. stall dispatch).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
    /// The tracking table had no free slot for a new in-flight entry.
    #[error("no free slot available (capacity {capacity})")]
    Full {
        /// The table's configured capacity.
        capacity: usize,
    },
}
