//! Load Classification Table: per-PC confidence, ignoring thread id by design.

use crate::common::{ConfigError, ThreadId};
use crate::primitives::SaturatingCounter;

/// Direct-mapped table of saturating counters indexed purely by PC.
///
/// `tid` is accepted on every public method for interface symmetry with
/// [`crate::lvpt::LoadValuePredictionTable`] and [`crate::cvu::ConstantVerificationUnit`],
/// but it never affects indexing — entries alias across thread contexts that
/// happen to hash to the same slot. This is a preserved design choice, not
/// an oversight.
#[derive(Debug, Clone)]
pub struct LoadClassificationTable {
    counters: Vec<SaturatingCounter>,
    mask: usize,
    inst_shift_amt: u32,
}

impl LoadClassificationTable {
    /// Creates a table with `entries` slots, each an `ctr_bits`-wide counter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotPowerOfTwo`] if `entries` is not a power of
    /// two, or propagates [`ConfigError::CounterWidthOutOfRange`] from the
    /// per-slot counter construction.
    pub fn new(entries: usize, ctr_bits: u8, inst_shift_amt: u32) -> Result<Self, ConfigError> {
        if entries == 0 || !entries.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                param: "LCTEntries",
                value: entries,
            });
        }
        let counter = SaturatingCounter::new(ctr_bits)?;
        Ok(Self {
            counters: vec![counter; entries],
            mask: entries - 1,
            inst_shift_amt,
        })
    }

    fn index(&self, pc: u64) -> usize {
        ((pc >> self.inst_shift_amt) as usize) & self.mask
    }

    /// Returns the raw counter value at the PC's mapped slot. Never fails.
    pub fn lookup(&self, _tid: ThreadId, pc: u64) -> u8 {
        self.counters[self.index(pc)].read()
    }

    /// Pure predicate: does the given counter value indicate "predictable"
    /// under this table's configured counter width?
    #[must_use]
    pub fn get_prediction(&self, counter: u8) -> bool {
        counter >= (1u8 << (self.ctr_bits() - 1))
    }

    /// The table's configured counter width, in bits.
    #[must_use]
    pub fn ctr_bits(&self) -> u8 {
        self.counters.first().map_or(0, SaturatingCounter::width)
    }

    /// The saturation maximum for this table's counters.
    #[must_use]
    pub fn ctr_max(&self) -> u8 {
        self.counters.first().map_or(0, SaturatingCounter::max)
    }

    /// Trains the counter for `pc`. A no-op when `squashed` is true: wrong-path
    /// results must never move confidence.
    pub fn update(&mut self, _tid: ThreadId, pc: u64, outcome: bool, squashed: bool) {
        if squashed {
            return;
        }
        let idx = self.index(pc);
        if outcome {
            self.counters[idx].increment();
        } else {
            self.counters[idx].decrement();
        }
    }

    /// Trains the counter at a raw table index rather than a PC.
    ///
    /// Used by [`crate::unit::LvpUnit::cvu_invalidate`] to downgrade the
    /// confidence of each CVU entry killed by a store, addressing it by the
    /// `pc_idx` the CVU already computed rather than re-hashing a PC (the
    /// CVU's index mask may come from a different table size than this
    /// one's, so the index is re-masked against this table's own capacity).
    pub(crate) fn update_at_index(&mut self, index: usize, outcome: bool, squashed: bool) {
        if squashed {
            return;
        }
        let idx = index & self.mask;
        if outcome {
            self.counters[idx].increment();
        } else {
            self.counters[idx].decrement();
        }
    }

    /// Resets every counter to zero, as at construction.
    pub fn reset(&mut self) {
        for c in &mut self.counters {
            c.reset();
        }
    }
}
