//! Load value prediction subsystem for an out-of-order superscalar core model.
//!
//! Speculates the result of a load instruction at dispatch so dependent
//! instructions can execute before the load retrieves its value from memory;
//! the prediction is verified at writeback and mispredictions are reported
//! through statistics for the host to act on. This crate owns four
//! cooperating tables:
//! 1. **Saturating counter:** the primitive confidence cell every table's
//!    state machine rests on.
//! 2. **LCT:** per-PC confidence — predictable vs. not, "constant" at
//!    saturation.
//! 3. **LVPT:** per-PC last-seen load value, tagged by thread.
//! 4. **CVU:** the set of currently-trusted address tuples for constant
//!    loads, with LRU replacement and store-driven range invalidation.
//!
//! These are orchestrated by [`unit::LvpUnit`], which exposes the host-facing
//! `predict`/`update`/`cvu_invalidate`/`cvu_valid` call surface. Instruction
//! fetch, decode, dispatch, the register rename map, pipeline latch plumbing,
//! the ISA-level memory model, and the physical memory backend are all
//! external collaborators this crate does not model.

/// Common types shared across the subsystem (thread ids, error types).
pub mod common;
/// Construction parameters for the prediction tables and the facade.
pub mod config;
/// Constant Verification Unit: trusted address tuples with LRU eviction.
pub mod cvu;
/// In-flight load/store descriptors.
pub mod instruction;
/// Load Classification Table: per-PC confidence counters.
pub mod lct;
/// Load Value Prediction Table: per-PC last-seen value.
pub mod lvpt;
/// Saturating counter and other small building blocks.
pub mod primitives;
/// Statistics surface.
pub mod stats;
/// `LvpUnit`, the host-facing orchestrator.
pub mod unit;
/// Verification-Pending Tracking Table.
pub mod vptt;

/// Root configuration type; use `LvpConfig::default()` or deserialize from JSON.
pub use crate::config::LvpConfig;
/// In-flight load/store descriptors the host populates and the core mutates.
pub use crate::instruction::{LoadInstruction, StoreInstruction};
/// Accumulated prediction statistics.
pub use crate::stats::LvpStats;
/// The orchestrator type: construct with `LvpUnit::new(&config)`.
pub use crate::unit::LvpUnit;
