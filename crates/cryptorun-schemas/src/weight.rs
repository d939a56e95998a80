use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::regime::Regime;

/// Movement-gate configuration attached to a [`WeightPreset`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovementGate {
    pub min_move_pct: f64,
    pub window_hours: u32,
    pub volume_surge_required: bool,
    pub tightened_thresholds: bool,
}

/// Regime -> factor-weight mapping plus its movement gate (spec.md §4.3).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightPreset {
    pub regime: Regime,
    /// Factor name -> weight. Keys: `momentum`, `technical_resid`,
    /// `supply_demand`, `weekly_carry`.
    pub weights: BTreeMap<String, f64>,
    pub movement_gate: MovementGate,
}

impl WeightPreset {
    pub fn weight(&self, factor: &str) -> f64 {
        self.weights.get(factor).copied().unwrap_or(0.0)
    }

    /// Sum of weights must lie in `[0.95, 1.05]` (spec.md §4.3, §8 property 4).
    pub fn weight_sum(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn weights_valid(&self) -> bool {
        (0.95..=1.05).contains(&self.weight_sum())
    }
}
