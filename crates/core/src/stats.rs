//! Statistics surface: plain named counters emitted at simulation-end,
//! plus the ratios derived from them.

/// Counters tracked by [`crate::unit::LvpUnit`] across its public call surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct LvpStats {
    /// Total `predict()` calls.
    pub lookups: u64,
    /// `predict()` calls that returned `true`.
    pub pred_total: u64,
    /// `update()` calls where the predicted value matched the actual value.
    pub pred_correct: u64,
    /// `update()` calls where the predicted value did not match.
    pub pred_incorrect: u64,
    /// `predict()` calls that set `ld_constant`.
    pub const_pred: u64,
    /// CVU entries killed across all `cvu_invalidate()` calls.
    pub const_inval: u64,
    /// Mispredictions where the load had been predicted "constant".
    pub const_rollback: u64,
}

impl LvpStats {
    /// Fraction of `predict()` calls that returned a prediction.
    ///
    /// Returns `0.0` when there have been no lookups, rather than dividing
    /// by zero.
    #[must_use]
    pub fn pred_rate(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.pred_total as f64 / self.lookups as f64
        }
    }

    /// Fraction of predicted-and-verified loads that were correct.
    ///
    /// Returns `0.0` when no prediction has yet been verified.
    #[must_use]
    pub fn pred_accuracy(&self) -> f64 {
        let verified = self.pred_correct + self.pred_incorrect;
        if verified == 0 {
            0.0
        } else {
            self.pred_correct as f64 / verified as f64
        }
    }

    /// Writes a human-readable summary to stdout.
    pub fn print(&self) {
        println!("==========================================================");
        println!("LOAD VALUE PREDICTION STATISTICS");
        println!("==========================================================");
        println!("lookups                  {}", self.lookups);
        println!("pred_total               {}", self.pred_total);
        println!("pred_correct             {}", self.pred_correct);
        println!("pred_incorrect           {}", self.pred_incorrect);
        println!("const_pred               {}", self.const_pred);
        println!("const_inval              {}", self.const_inval);
        println!("const_rollback           {}", self.const_rollback);
        println!("----------------------------------------------------------");
        println!("pred_rate                {:.4}", self.pred_rate());
        println!("pred_accuracy            {:.4}", self.pred_accuracy());
        println!("==========================================================");
    }
}
