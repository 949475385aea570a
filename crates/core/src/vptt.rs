//! Verification-Pending Tracking Table: a small lookaside pool that lets the
//! host re-associate a writeback event with the prediction context it
//! originated from.

use crate::common::{CapacityError, ThreadId};

#[derive(Debug, Clone, Copy)]
struct Entry {
    seq_num: u64,
    data_addr: u64,
    tid: ThreadId,
    valid: bool,
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            seq_num: 0,
            data_addr: 0,
            tid: ThreadId::new(0),
            valid: false,
        }
    }
}

/// Capacity-limited linear pool of in-flight predicted loads, keyed by
/// sequence number. A transient association table, not a cache: entries
/// never age out on their own, only on explicit `remove`.
#[derive(Debug, Clone)]
pub struct VerificationPendingTrackingTable {
    entries: Vec<Entry>,
}

impl VerificationPendingTrackingTable {
    /// Creates an empty table with room for `capacity` in-flight entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: vec![Entry::default(); capacity],
        }
    }

    /// Configured capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of currently tracked entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.valid).count()
    }

    /// True when no entry is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts a new in-flight entry into the first free slot.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::Full`] if every slot is occupied.
    pub fn insert(&mut self, seq_num: u64, data_addr: u64, tid: ThreadId) -> Result<(), CapacityError> {
        let slot = self
            .entries
            .iter()
            .position(|e| !e.valid)
            .ok_or(CapacityError::Full {
                capacity: self.entries.len(),
            })?;
        self.entries[slot] = Entry {
            seq_num,
            data_addr,
            tid,
            valid: true,
        };
        Ok(())
    }

    /// Linear lookup by sequence number.
    #[must_use]
    pub fn lookup(&self, seq_num: u64) -> Option<(u64, ThreadId)> {
        self.entries
            .iter()
            .find(|e| e.valid && e.seq_num == seq_num)
            .map(|e| (e.data_addr, e.tid))
    }

    /// Removes the entry for `seq_num`, if any. Idempotent: removing an
    /// already-missing sequence number is a silent no-op.
    pub fn remove(&mut self, seq_num: u64) {
        if let Some(e) = self.entries.iter_mut().find(|e| e.valid && e.seq_num == seq_num) {
            *e = Entry::default();
        }
    }

    /// Clears every entry.
    pub fn reset(&mut self) {
        for e in &mut self.entries {
            *e = Entry::default();
        }
    }
}
