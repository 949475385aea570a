//! Thread-identifier newtype.
//!
//! Addresses are left as plain `u64` throughout this crate: the tables here
//! never distinguish virtual from physical addressing, so a newtype would
//! add ceremony without adding safety. `tid` is different — it is a
//! load-bearing qualifier that some tables tag on and others deliberately
//! ignore (see [`crate::lct`]), so it gets its own type to keep that
//! asymmetry visible at call sites instead of buried in an untyped integer.

/// Identifies the hardware thread context a load or store executes under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThreadId(pub u32);

impl ThreadId {
    /// Creates a new thread id from a raw value.
    #[inline]
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw thread id value.
    #[inline]
    #[must_use]
    pub fn val(self) -> u32 {
        self.0
    }
}

impl From<u32> for ThreadId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
