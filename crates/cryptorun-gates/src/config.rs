use serde::{Deserialize, Serialize};

/// Hard entry gate thresholds (spec.md §4.6). All configurable; these are
/// the PRD defaults.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub min_score: f64,
    pub min_vadr: f64,
    pub min_zscore_magnitude: f64,
    /// `T` in the funding sign-consistency condition (spec.md §4.6):
    /// `z <= -threshold AND price/VWAP >= T` OR `z >= +threshold AND
    /// price/VWAP <= 2-T`. Spec.md names `T` without a numeric default;
    /// `1.0` (price at or past parity with VWAP) is the neutral midpoint
    /// and the value used here absent a config override.
    pub price_vwap_t: f64,
    pub min_venues_required: usize,
    pub max_funding_age_hours: f64,
    pub max_bar_age_bars: f64,
    pub max_late_fill_seconds: i64,
    pub atr_proximity_multiple: f64,
    pub fatigue_momentum_threshold_pct: f64,
    pub fatigue_rsi_threshold: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_score: 75.0,
            min_vadr: 1.8,
            min_zscore_magnitude: 2.0,
            price_vwap_t: 1.0,
            min_venues_required: 2,
            max_funding_age_hours: 4.0,
            max_bar_age_bars: 2.0,
            max_late_fill_seconds: 30,
            atr_proximity_multiple: 1.2,
            fatigue_momentum_threshold_pct: 12.0,
            fatigue_rsi_threshold: 70.0,
        }
    }
}
