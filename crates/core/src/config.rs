//! Configuration for the load value prediction subsystem.
//!
//! Mirrors the construction parameters enumerated for [`crate::unit::LvpUnit`]:
//! one flat, JSON-deserializable struct with a private `defaults` module of
//! named constants and a hand-written [`Default`] impl, so every field has a
//! sane value when a configuration omits it.

use serde::Deserialize;

/// Default configuration constants for the prediction subsystem.
mod defaults {
    /// Default LCT slot count (power of two).
    pub const LCT_ENTRIES: usize = 1024;

    /// Default LCT saturating counter width, in bits.
    pub const LCT_CTR_BITS: u8 = 2;

    /// Default LVPT slot count (power of two).
    pub const LVPT_ENTRIES: usize = 1024;

    /// Default CVU capacity. No power-of-two constraint.
    pub const CVU_NUM_ENTRIES: usize = 256;

    /// Default count of low-order PC bits discarded when indexing.
    pub const INST_SHIFT_AMT: u32 = 2;

    /// Default thread count, informational only.
    pub const NUM_THREADS: u32 = 1;

    /// Default VPTT capacity.
    pub const VPTT_ENTRIES: usize = 64;
}

/// Construction parameters for [`crate::unit::LvpUnit`].
///
/// Deserializable from JSON; any field omitted from the source document
/// falls back to the value in [`defaults`].
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LvpConfig {
    /// Power-of-two slot count for the Load Classification Table.
    #[serde(default = "LvpConfig::default_lct_entries")]
    pub lct_entries: usize,

    /// Counter width, in bits, for each LCT slot (typically 2).
    #[serde(default = "LvpConfig::default_lct_ctr_bits")]
    pub lct_ctr_bits: u8,

    /// Power-of-two slot count for the Load Value Prediction Table.
    #[serde(default = "LvpConfig::default_lvpt_entries")]
    pub lvpt_entries: usize,

    /// Fully-associative capacity of the Constant Verification Unit.
    #[serde(default = "LvpConfig::default_cvu_num_entries")]
    pub cvu_num_entries: usize,

    /// Low-order PC bits discarded when indexing LCT/LVPT/CVU.
    #[serde(default = "LvpConfig::default_inst_shift_amt")]
    pub inst_shift_amt: u32,

    /// Thread count. Informational tagging only; does not affect index width.
    #[serde(default = "LvpConfig::default_num_threads")]
    pub num_threads: u32,

    /// Capacity of the Verification-Pending Tracking Table.
    #[serde(default = "LvpConfig::default_vptt_entries")]
    pub vptt_entries: usize,
}

impl LvpConfig {
    fn default_lct_entries() -> usize {
        defaults::LCT_ENTRIES
    }

    fn default_lct_ctr_bits() -> u8 {
        defaults::LCT_CTR_BITS
    }

    fn default_lvpt_entries() -> usize {
        defaults::LVPT_ENTRIES
    }

    fn default_cvu_num_entries() -> usize {
        defaults::CVU_NUM_ENTRIES
    }

    fn default_inst_shift_amt() -> u32 {
        defaults::INST_SHIFT_AMT
    }

    fn default_num_threads() -> u32 {
        defaults::NUM_THREADS
    }

    fn default_vptt_entries() -> usize {
        defaults::VPTT_ENTRIES
    }
}

impl Default for LvpConfig {
    fn default() -> Self {
        Self {
            lct_entries: defaults::LCT_ENTRIES,
            lct_ctr_bits: defaults::LCT_CTR_BITS,
            lvpt_entries: defaults::LVPT_ENTRIES,
            cvu_num_entries: defaults::CVU_NUM_ENTRIES,
            inst_shift_amt: defaults::INST_SHIFT_AMT,
            num_threads: defaults::NUM_THREADS,
            vptt_entries: defaults::VPTT_ENTRIES,
        }
    }
}
