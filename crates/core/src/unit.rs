//! `LvpUnit`: orchestrates the Load Classification Table, Load Value
//! Prediction Table, Constant Verification Unit, and Verification-Pending
//! Tracking Table behind the host-facing `predict`/`update`/
//! `cvu_invalidate`/`cvu_valid` call surface.

use tracing::{debug, trace, warn};

use crate::common::ConfigError;
use crate::config::LvpConfig;
use crate::cvu::ConstantVerificationUnit;
use crate::instruction::{LoadInstruction, StoreInstruction};
use crate::lct::LoadClassificationTable;
use crate::lvpt::LoadValuePredictionTable;
use crate::stats::LvpStats;
use crate::vptt::VerificationPendingTrackingTable;

/// The load value prediction subsystem: a single concrete orchestrator type
/// composing its four tables behind one call surface.
///
/// Polymorphism over predictor variants is deliberately not provided here;
/// the source sketches a virtual predictor base class that was never
/// exercised by a second implementation, so this type stays concrete until
/// a second variant actually exists.
#[derive(Debug, Clone)]
pub struct LvpUnit {
    lct: LoadClassificationTable,
    lvpt: LoadValuePredictionTable,
    cvu: ConstantVerificationUnit,
    vptt: VerificationPendingTrackingTable,
    stats: LvpStats,
}

impl LvpUnit {
    /// Constructs a unit from its configuration.
    ///
    /// # Errors
    ///
    /// Propagates [`ConfigError`] from whichever table's construction
    /// parameter is invalid (non-power-of-two sizes, out-of-range counter
    /// width, zero capacity).
    pub fn new(config: &LvpConfig) -> Result<Self, ConfigError> {
        let lct = LoadClassificationTable::new(
            config.lct_entries,
            config.lct_ctr_bits,
            config.inst_shift_amt,
        )?;
        let lvpt = LoadValuePredictionTable::new(config.lvpt_entries, config.inst_shift_amt)?;
        let cvu = ConstantVerificationUnit::new(
            config.cvu_num_entries,
            config.lvpt_entries,
            config.inst_shift_amt,
        )?;
        let vptt = VerificationPendingTrackingTable::new(config.vptt_entries);
        Ok(Self {
            lct,
            lvpt,
            cvu,
            vptt,
            stats: LvpStats::default(),
        })
    }

    /// Read-only access to the accumulated statistics.
    #[must_use]
    pub fn stats(&self) -> &LvpStats {
        &self.stats
    }

    /// Dispatch-time prediction. Writes `ld_predictable`, `ld_constant`, and
    /// `predicted_value` onto `inst`, bumps lookup/prediction counters, and
    /// registers the load in the tracking table so a later `update()` can be
    /// matched back to this prediction context.
    ///
    /// Returns `ld_predictable`.
    pub fn predict(&mut self, inst: &mut LoadInstruction) -> bool {
        self.stats.lookups += 1;

        let counter = self.lct.lookup(inst.tid, inst.pc);
        let predictable = self.lct.get_prediction(counter);
        let lvpt_hit = self.lvpt.valid(inst.pc, inst.tid);
        let predicted_value = if lvpt_hit {
            self.lvpt.lookup(inst.pc, inst.tid)
        } else {
            0
        };

        let ld_predictable = predictable && lvpt_hit;
        let ld_constant = counter == self.lct.ctr_max() && lvpt_hit;

        inst.set_ld_predictable(ld_predictable);
        inst.set_ld_constant(ld_constant);
        inst.set_predicted_value(if ld_predictable { predicted_value } else { 0 });
        inst.set_dispatch_snapshot(lvpt_hit.then_some(predicted_value));

        if ld_predictable {
            self.stats.pred_total += 1;
        }
        if ld_constant {
            self.stats.const_pred += 1;
        }

        trace!(
            pc = inst.pc,
            tid = inst.tid.val(),
            seq_num = inst.seq_num,
            ld_predictable,
            ld_constant,
            "predict"
        );

        if let Err(err) = self.vptt.insert(inst.seq_num, inst.eff_addr.unwrap_or(0), inst.tid) {
            warn!(seq_num = inst.seq_num, ?err, "VPTT full, dropping tracking entry");
        }

        ld_predictable
    }

    /// Writeback-time verification. A no-op with respect to LCT/LVPT/CVU
    /// state when `squashed` is true, per the subsystem's cancellation
    /// contract.
    pub fn update(&mut self, inst: &LoadInstruction, squashed: bool) {
        if squashed {
            self.vptt.remove(inst.seq_num);
            return;
        }

        let pc = inst.pc;
        let tid = inst.tid;
        let actual = inst.mem_value.unwrap_or(0);

        if !self.lvpt.valid(pc, tid) {
            self.lvpt.update(pc, actual, tid);
            self.lct.update(tid, pc, true, false);
            debug!(pc, tid = tid.val(), actual, "update: fresh LVPT entry");
            self.vptt.remove(inst.seq_num);
            return;
        }

        let predicted = inst.predicted_value_at_dispatch().unwrap_or(inst.predicted_value());
        let stored = self.lvpt.lookup(pc, tid);
        if stored != predicted {
            debug!(
                pc,
                tid = tid.val(),
                stored,
                predicted,
                "LVPT drift since dispatch, tolerated"
            );
        }

        if actual == predicted {
            self.lct.update(tid, pc, true, false);
            if self.lct.lookup(tid, pc) == self.lct.ctr_max() {
                let eff_addr = inst.eff_addr.unwrap_or(0);
                let eff_size = inst.eff_size.unwrap_or(0);
                self.cvu.update(pc, eff_addr, eff_size, actual, tid);
                trace!(pc, tid = tid.val(), "LCT saturated, CVU entry installed");
            }
            if inst.ld_predictable() {
                self.stats.pred_correct += 1;
            }
        } else {
            self.lct.update(tid, pc, false, false);
            if self.lct.lookup(tid, pc) == 0 {
                self.lvpt.update(pc, actual, tid);
                debug!(pc, tid = tid.val(), actual, "LCT floor, LVPT refreshed");
            }
            self.stats.pred_incorrect += 1;
            if inst.ld_constant() {
                self.stats.const_rollback += 1;
            }
        }

        self.vptt.remove(inst.seq_num);
    }

    /// Store address-ready path: clears every CVU entry the store's byte
    /// range overlaps, and downgrades LCT confidence for the affected PCs.
    ///
    /// Which PC's confidence gets downgraded is configurable: by default,
    /// each killed entry's own `pc_idx` is downgraded (the behavior this
    /// crate prefers); building with the `store-pc-downgrade` feature
    /// instead downgrades the store's own PC once per call, for bit-exact
    /// parity with the observed source behavior. See `DESIGN.md`.
    pub fn cvu_invalidate(&mut self, store: &StoreInstruction) -> bool {
        let killed = self
            .cvu
            .invalidate(store.pc, store.eff_addr, store.eff_size, store.tid);

        if killed {
            self.stats.const_inval += self.cvu.killed_pc_indices().len() as u64;

            if cfg!(feature = "store-pc-downgrade") {
                self.lct.update(store.tid, store.pc, false, false);
            } else {
                let killed_indices: Vec<u32> = self.cvu.killed_pc_indices().to_vec();
                for pc_idx in killed_indices {
                    self.lct.update_at_index(pc_idx as usize, false, false);
                }
            }

            trace!(
                pc = store.pc,
                addr = store.eff_addr,
                size = store.eff_size,
                "cvu_invalidate killed entries"
            );
        }

        killed
    }

    /// Pure delegation to the CVU's bypass-certification query. Returns
    /// `false` when the load's effective address is not yet known.
    pub fn cvu_valid(&mut self, load: &LoadInstruction) -> bool {
        match load.eff_addr {
            Some(addr) => self.cvu.valid(load.pc, addr, load.tid),
            None => false,
        }
    }

    /// Resets every table to its initial (all-invalid / all-zero) state.
    /// Statistics counters are left untouched.
    pub fn reset(&mut self) {
        self.lct.reset();
        self.lvpt.reset();
        self.cvu.reset();
        self.vptt.reset();
    }
}
