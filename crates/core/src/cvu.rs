//! Constant Verification Unit: the set of currently-trusted address tuples
//! that lets a saturated-confidence load bypass memory entirely.

use crate::common::{ConfigError, ThreadId};

#[derive(Debug, Clone, Copy)]
struct Entry {
    valid: bool,
    pc_idx: u32,
    data_addr: u64,
    eff_size: u32,
    tid: ThreadId,
    lru: u8,
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            valid: false,
            pc_idx: 0,
            data_addr: 0,
            eff_size: 0,
            tid: ThreadId::new(0),
            lru: 0,
        }
    }
}

fn ranges_overlap(a: u64, sa: u64, b: u64, sb: u64) -> bool {
    let sa = sa.max(1);
    let sb = sb.max(1);
    a <= b.saturating_add(sb).saturating_sub(1) && b <= a.saturating_add(sa).saturating_sub(1)
}

/// Fully-associative set of `(pc_idx, data_addr, eff_size, tid)` tuples
/// certified safe for memory bypass, with shift-register LRU replacement
/// and store-driven range-overlap invalidation.
#[derive(Debug, Clone)]
pub struct ConstantVerificationUnit {
    entries: Vec<Entry>,
    pc_mask: usize,
    inst_shift_amt: u32,
    last_invalidated: Vec<u32>,
}

impl ConstantVerificationUnit {
    /// Creates a CVU with `num_entries` fully-associative slots.
    ///
    /// `lvpt_entries` supplies the index width used to compress a PC into
    /// `pc_idx`: it must match the LVPT/LCT mask so a CVU entry addresses
    /// the same backing value LVPT holds for that slot. `num_entries`
    /// itself carries no power-of-two constraint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Zero`] if `num_entries` is zero, or
    /// [`ConfigError::NotPowerOfTwo`] if `lvpt_entries` is not a power of two.
    pub fn new(
        num_entries: usize,
        lvpt_entries: usize,
        inst_shift_amt: u32,
    ) -> Result<Self, ConfigError> {
        if num_entries == 0 {
            return Err(ConfigError::Zero {
                param: "CVUnumEntries",
            });
        }
        if lvpt_entries == 0 || !lvpt_entries.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                param: "LVPTEntries",
                value: lvpt_entries,
            });
        }
        Ok(Self {
            entries: vec![Entry::default(); num_entries],
            pc_mask: lvpt_entries - 1,
            inst_shift_amt,
            last_invalidated: Vec::new(),
        })
    }

    /// Configured capacity (`N_CVU`).
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of currently valid entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.valid).count()
    }

    /// True when no entry is valid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn pc_idx(&self, pc: u64) -> u32 {
        (((pc >> self.inst_shift_amt) as usize) & self.pc_mask) as u32
    }

    /// Shifts every entry's LRU age right by one, then sets the referenced
    /// entry's top bit, marking it most-recently-used.
    fn touch(&mut self, referenced: usize) {
        for (i, e) in self.entries.iter_mut().enumerate() {
            e.lru >>= 1;
            if i == referenced {
                e.lru |= 0x80;
            }
        }
    }

    /// Returns true if a valid entry certifies `(pc, data_addr, tid)` as
    /// still trusted. A matching reference refreshes the entry's LRU age.
    pub fn valid(&mut self, pc: u64, data_addr: u64, tid: ThreadId) -> bool {
        let pc_idx = self.pc_idx(pc);
        let hit = self.entries.iter().position(|e| {
            e.valid && e.pc_idx == pc_idx && e.data_addr == data_addr && e.tid == tid
        });
        if let Some(idx) = hit {
            self.touch(idx);
            true
        } else {
            false
        }
    }

    /// Invalidates every valid entry whose captured byte range overlaps
    /// `[store_addr, store_addr + store_size - 1]`. Matching considers only
    /// address-range overlap: a store from any thread invalidates any
    /// thread's cached entry over the same memory, since the memory itself
    /// is shared regardless of which thread's load certified it.
    ///
    /// Returns true if at least one entry was killed.
    pub fn invalidate(&mut self, _store_pc: u64, store_addr: u64, store_size: u32, _tid: ThreadId) -> bool {
        self.last_invalidated.clear();
        for e in &mut self.entries {
            if e.valid
                && ranges_overlap(
                    store_addr,
                    u64::from(store_size),
                    e.data_addr,
                    u64::from(e.eff_size),
                )
            {
                self.last_invalidated.push(e.pc_idx);
                *e = Entry::default();
            }
        }
        !self.last_invalidated.is_empty()
    }

    /// The `pc_idx` of every entry killed by the most recent [`Self::invalidate`]
    /// call. Cleared and repopulated on each call; empty before the first one.
    #[must_use]
    pub fn killed_pc_indices(&self) -> &[u32] {
        &self.last_invalidated
    }

    /// Finds the slot with the smallest LRU age, breaking ties by lowest index.
    fn replacement(&self) -> usize {
        self.entries
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| e.lru)
            .map_or(0, |(i, _)| i)
    }

    /// Installs a newly-saturated load's trusted tuple, evicting the least
    /// recently referenced entry if the CVU is at capacity.
    ///
    /// The CVU is a *set* of trusted tuples, and the orchestrator calls this
    /// on every correct writeback while the LCT is already at saturation,
    /// not only on the transition into saturation.
    /// If a valid entry already matches `(pc_idx, data_addr, tid)`, this is
    /// treated as a re-reference of that entry (LRU age refreshed, `eff_size`
    /// updated) rather than a second install — otherwise a hot, already-cached
    /// load would progressively self-evict its neighbors by duplicating its
    /// own tuple across every free slot.
    ///
    /// `value` is accepted for interface symmetry with the call site that
    /// triggers this install (the writeback value that caused the LCT to
    /// saturate) but is intentionally not stored: the CVU only certifies
    /// that no invalidating store has landed since install, it never
    /// duplicates the value already held by the LVPT.
    pub fn update(&mut self, pc: u64, data_addr: u64, eff_size: u32, _value: u64, tid: ThreadId) {
        let pc_idx = self.pc_idx(pc);

        if let Some(existing) = self.entries.iter().position(|e| {
            e.valid && e.pc_idx == pc_idx && e.data_addr == data_addr && e.tid == tid
        }) {
            self.entries[existing].eff_size = eff_size;
            self.touch(existing);
            return;
        }

        let target = self
            .entries
            .iter()
            .position(|e| !e.valid)
            .unwrap_or_else(|| self.replacement());
        self.entries[target] = Entry {
            valid: true,
            pc_idx,
            data_addr,
            eff_size,
            tid,
            lru: 0,
        };
        self.touch(target);
    }

    /// Marks every entry invalid.
    pub fn reset(&mut self) {
        for e in &mut self.entries {
            *e = Entry::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tid(n: u32) -> ThreadId {
        ThreadId::new(n)
    }

    #[test]
    fn rejects_zero_capacity() {
        assert!(ConstantVerificationUnit::new(0, 64, 2).is_err());
    }

    #[test]
    fn install_then_valid_round_trip() {
        let mut cvu = ConstantVerificationUnit::new(4, 64, 2).unwrap();
        cvu.update(0x1000, 0x2000, 8, 0xdead_beef, tid(0));
        assert!(cvu.valid(0x1000, 0x2000, tid(0)));
        // a second read must not itself evict the entry.
        assert!(cvu.valid(0x1000, 0x2000, tid(0)));
    }

    #[test]
    fn partial_range_overlap_invalidates() {
        let mut cvu = ConstantVerificationUnit::new(4, 64, 2).unwrap();
        cvu.update(0x1000, 0x100, 8, 0, tid(0));
        assert!(cvu.invalidate(0x9000, 0x104, 2, tid(0)));
        assert!(!cvu.valid(0x1000, 0x100, tid(0)));
    }

    #[test]
    fn disjoint_store_does_not_invalidate() {
        let mut cvu = ConstantVerificationUnit::new(4, 64, 2).unwrap();
        cvu.update(0x1000, 0x100, 4, 0, tid(0));
        assert!(!cvu.invalidate(0x9000, 0x200, 4, tid(0)));
        assert!(cvu.valid(0x1000, 0x100, tid(0)));
    }

    #[test]
    fn repeated_invalidate_returns_false_second_time() {
        let mut cvu = ConstantVerificationUnit::new(4, 64, 2).unwrap();
        cvu.update(0x1000, 0x100, 8, 0, tid(0));
        assert!(cvu.invalidate(0x9000, 0x100, 8, tid(0)));
        assert!(!cvu.invalidate(0x9000, 0x100, 8, tid(0)));
    }

    #[test]
    fn repeated_update_of_resident_tuple_does_not_duplicate() {
        let mut cvu = ConstantVerificationUnit::new(2, 64, 2).unwrap();
        cvu.update(0x1000, 0x100, 4, 0, tid(0));
        cvu.update(0x1000, 0x100, 4, 0, tid(0));
        cvu.update(0x1000, 0x100, 4, 0, tid(0));
        assert_eq!(cvu.len(), 1);
    }

    #[test]
    fn lru_evicts_least_recently_referenced() {
        let mut cvu = ConstantVerificationUnit::new(2, 64, 2).unwrap();
        cvu.update(0xA, 0x100, 4, 0, tid(0)); // E1
        cvu.update(0xB, 0x200, 4, 0, tid(0)); // E2
        assert!(cvu.valid(0xA, 0x100, tid(0))); // reference E1, ages E2 down
        cvu.update(0xC, 0x300, 4, 0, tid(0)); // E3, should evict E2
        assert!(cvu.valid(0xA, 0x100, tid(0)));
        assert!(cvu.valid(0xC, 0x300, tid(0)));
        assert!(!cvu.valid(0xB, 0x200, tid(0)));
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut cvu = ConstantVerificationUnit::new(2, 64, 2).unwrap();
        for i in 0..10u64 {
            cvu.update(i, i * 8, 4, 0, tid(0));
            assert!(cvu.len() <= 2);
        }
    }
}
