use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use cryptorun_microstructure::SourceTier;
use cryptorun_schemas::{FactorBundle, Venue};

/// Per-venue reference data the microstructure validator needs beyond the
/// order book itself (spec.md §4.2's VADR denominator and staleness-tier
/// inputs). A real deployment sources these from the venue's ticker/
/// reference-data feed; fetching them is outside `VenueClient`'s order-book
/// capability, so the orchestrator receives them as caller-supplied input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VenueReferenceData {
    pub data_source: String,
    pub source_tier: SourceTier,
    pub is_exchange_native: bool,
    pub has_trades: bool,
    pub high_24h: f64,
    pub low_24h: f64,
    pub volume_24h: f64,
    pub market_cap: f64,
    pub avg_price: f64,
    pub circulating_supply: f64,
}

/// Per-symbol raw inputs the gate cascade (C7) needs beyond what
/// microstructure/scoring already compute: funding divergence, freshness,
/// late-fill timing, ATR proximity, and the fatigue momentum/RSI pair.
/// No momentum/ATR/RSI detector is in scope for this repository — the
/// orchestrator receives these as a caller-supplied side input per symbol,
/// the same way `FactorBundle` values are supplied (spec.md §6).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GateSignalInputs {
    pub funding_zscore: f64,
    pub price_to_vwap: f64,
    pub funding_venues_count: usize,
    pub funding_freshness_hours: f64,
    pub bar_age_bars: f64,
    pub signal_time_secs: i64,
    pub execution_time_secs: i64,
    pub atr_distance: f64,
    pub atr_current: f64,
    pub momentum_24h_pct: f64,
    pub rsi_4h: f64,
}

/// Everything the orchestrator needs for one symbol at one scan tick,
/// beyond what it fetches itself through `VenueClient` (spec.md §6).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymbolScanInput {
    pub factors: FactorBundle,
    pub gate_signals: GateSignalInputs,
    /// One entry per venue this symbol should be checked against. Symbols
    /// present in the universe but absent here are skipped with no
    /// eligibility result at all (nothing to check them against).
    pub venues: BTreeMap<Venue, VenueReferenceData>,
}
