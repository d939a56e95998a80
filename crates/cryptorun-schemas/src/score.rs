use serde::{Deserialize, Serialize};

use crate::regime::Regime;

/// Per-part contribution to the internal score, for provenance (spec.md §4.5).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreContribution {
    pub factor: String,
    pub weight: f64,
    pub residual_value: f64,
    pub contribution: f64,
}

/// Composite score for one symbol at one tick (spec.md §3).
///
/// Invariant: `final_with_social == clamp(internal + min(social_resid, 10), 0, 110)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub internal: f64,
    pub social_resid: f64,
    pub final_with_social: f64,
    pub contributions: Vec<ScoreContribution>,
    pub regime: Regime,
}

impl CompositeScore {
    pub fn invariant_holds(&self, tolerance: f64) -> bool {
        let expected =
            (self.internal + self.social_resid.min(10.0)).clamp(0.0, 110.0);
        (self.final_with_social - expected).abs() <= tolerance
    }
}
