use serde::{Deserialize, Serialize};

/// Computed microstructure metrics for one symbol/venue/tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MicrostructureMetrics {
    pub spread_bps: f64,
    pub depth_usd_plus_minus_2pct: f64,
    pub vadr: f64,
    pub adv: f64,
    /// 0..=100.
    pub data_quality: f64,

    pub spread_ok: bool,
    pub depth_ok: bool,
    pub vadr_ok: bool,
    pub staleness_ok: bool,
    pub impact_ok: bool,
    pub exchange_native_ok: bool,

    pub overall_valid: bool,
}

impl MicrostructureMetrics {
    /// `data_quality` is clamped into `[0, 100]` defensively; callers
    /// computing it via the deduction ladder in spec.md §4.2 should already
    /// produce a value in range, but this guards against a bad upstream
    /// feed producing an out-of-range score.
    pub fn clamp_data_quality(mut self) -> Self {
        self.data_quality = self.data_quality.clamp(0.0, 100.0);
        self
    }
}

/// Recommendation bucket derived from a [`crate::microstructure::ValidationResult`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Approved,
    ApprovedWithCaution,
    Rejected,
}

/// Output of the microstructure validator (C2).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub passed: bool,
    pub failure_reasons: Vec<String>,
    pub warnings: Vec<String>,
    pub metrics: MicrostructureMetrics,
    /// 0..=100.
    pub confidence_score: f64,
    pub recommendation: Recommendation,
}
