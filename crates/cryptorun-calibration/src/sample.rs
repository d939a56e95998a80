use serde::{Deserialize, Serialize};

use cryptorun_schemas::Regime;

/// One observed (score, outcome) pair fed back into the calibrator after a
/// signal's holding period has elapsed (spec.md §4.9).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSample {
    pub regime: Regime,
    pub score: f64,
    pub realized_move_pct: f64,
    pub observed_at: i64,
}

impl CalibrationSample {
    pub fn new(regime: Regime, score: f64, realized_move_pct: f64, observed_at: i64) -> Self {
        Self { regime, score, realized_move_pct, observed_at }
    }

    /// Whether this sample counts as a "hit" against `target_move_pct`.
    pub fn is_hit(&self, target_move_pct: f64) -> bool {
        self.realized_move_pct >= target_move_pct
    }
}
