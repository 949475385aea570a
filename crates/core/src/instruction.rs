//! In-flight load/store descriptors: the plain-data surface the host
//! populates and [`crate::unit::LvpUnit`] mutates through named setters.

use crate::common::ThreadId;

/// An in-flight load instruction as seen by the prediction core.
///
/// The host owns and populates `pc`, `tid`, `seq_num`, and the effective
/// address/size once address generation completes; `predict` and `update`
/// write the remaining fields through their named setters, mirroring the
/// narrow `setLdPredictable`/`setLdConstant`/`setPredictedValue` mutation
/// surface this type is modeled on.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadInstruction {
    /// Program counter of the load.
    pub pc: u64,
    /// Thread context the load executes under.
    pub tid: ThreadId,
    /// Program-order sequence number, used to key the tracking table.
    pub seq_num: u64,
    /// Effective address, once known (`None` before address generation).
    pub eff_addr: Option<u64>,
    /// Effective byte size, once known.
    pub eff_size: Option<u32>,
    /// The actual value loaded from memory, attached before `update()`.
    pub mem_value: Option<u64>,

    ld_predictable: bool,
    ld_constant: bool,
    predicted_value: u64,
    predicted_value_at_dispatch: Option<u64>,
}

impl LoadInstruction {
    /// Creates a descriptor for a load not yet address-generated.
    #[must_use]
    pub fn new(pc: u64, tid: ThreadId, seq_num: u64) -> Self {
        Self {
            pc,
            tid,
            seq_num,
            ..Self::default()
        }
    }

    /// Whether `predict` judged this load predictable (LCT ∧ LVPT hit).
    #[must_use]
    pub fn ld_predictable(&self) -> bool {
        self.ld_predictable
    }

    /// Whether `predict` judged this load's confidence "constant".
    #[must_use]
    pub fn ld_constant(&self) -> bool {
        self.ld_constant
    }

    /// The value `predict` attached, valid only when [`Self::ld_predictable`].
    #[must_use]
    pub fn predicted_value(&self) -> u64 {
        self.predicted_value
    }

    /// Core → instruction mutation: records the predictability verdict.
    pub fn set_ld_predictable(&mut self, predictable: bool) {
        self.ld_predictable = predictable;
    }

    /// Core → instruction mutation: records the "constant" verdict.
    pub fn set_ld_constant(&mut self, constant: bool) {
        self.ld_constant = constant;
    }

    /// Core → instruction mutation: records the value downstream consumers
    /// may speculate on. This is the real LVPT value only
    /// when [`Self::ld_predictable`]; otherwise a sentinel, since nothing
    /// downstream is entitled to read it.
    pub fn set_predicted_value(&mut self, value: u64) {
        self.predicted_value = value;
    }

    /// Snapshots the LVPT's lookup result at dispatch time, independent of
    /// whether the load was judged predictable.
    ///
    /// `update()`'s retraining comparison needs this even when the load
    /// wasn't predictable: an LCT counter below the MSB threshold but with
    /// an LVPT hit is still mid-climb toward saturation, and the writeback
    /// comparison against the actual value is what continues that climb.
    /// Gating this snapshot on `ld_predictable` (as the public
    /// `predicted_value` field is) would stall training at the first
    /// below-threshold counter value.
    pub fn set_dispatch_snapshot(&mut self, value: Option<u64>) {
        self.predicted_value_at_dispatch = value;
    }

    /// The value snapshotted by `set_dispatch_snapshot` at dispatch, read
    /// back by `update()` to compare against the LVPT's current contents.
    #[must_use]
    pub fn predicted_value_at_dispatch(&self) -> Option<u64> {
        self.predicted_value_at_dispatch
    }
}

/// An in-flight store instruction, as seen at the point its effective
/// address is known.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreInstruction {
    /// Program counter of the store.
    pub pc: u64,
    /// Thread context the store executes under.
    pub tid: ThreadId,
    /// Effective address written.
    pub eff_addr: u64,
    /// Effective byte size written.
    pub eff_size: u32,
}

impl StoreInstruction {
    /// Creates a store descriptor with a known effective address.
    #[must_use]
    pub fn new(pc: u64, tid: ThreadId, eff_addr: u64, eff_size: u32) -> Self {
        Self {
            pc,
            tid,
            eff_addr,
            eff_size,
        }
    }
}
