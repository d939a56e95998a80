/// Everything the hard entry gate cascade needs for one symbol at one tick
/// (spec.md §4.6).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GateInputs {
    pub final_with_social: f64,
    pub vadr: f64,

    /// Volume-weighted funding z-score across venues.
    pub funding_zscore: f64,
    pub price_to_vwap: f64,
    pub funding_venues_count: usize,
    pub funding_freshness_hours: f64,

    pub bar_age_bars: f64,

    pub signal_time_secs: i64,
    pub execution_time_secs: i64,

    pub atr_distance: f64,
    pub atr_current: f64,

    pub microstructure_passed: bool,

    pub momentum_24h_pct: f64,
    pub rsi_4h: f64,
}
