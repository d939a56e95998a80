use serde::{Deserialize, Serialize};

use cryptorun_schemas::{AssetEligibilityResult, Venue};

/// Per-venue measured values lifted straight out of the `ValidationProof`s
/// already computed by C2 (spread/depth/VADR) — no recomputation, just a
/// compact summary for `<symbol>_metrics_summary.json` (spec.md §4.7).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VenueMetrics {
    pub venue: Venue,
    pub spread_bps: f64,
    pub depth_usd: f64,
    pub vadr: f64,
    pub all_passed: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub symbol: String,
    pub checked_at: i64,
    pub overall_eligible: bool,
    pub per_venue: Vec<VenueMetrics>,
}

impl MetricsSummary {
    pub fn from_result(result: &AssetEligibilityResult) -> Self {
        let per_venue = result
            .master
            .venue_bundles
            .iter()
            .map(|b| VenueMetrics {
                venue: b.venue,
                spread_bps: b.spread_proof.actual,
                depth_usd: b.depth_proof.actual,
                vadr: b.vadr_proof.actual,
                all_passed: b.all_passed(),
            })
            .collect();

        Self {
            symbol: result.symbol.clone(),
            checked_at: result.checked_at,
            overall_eligible: result.overall_eligible,
            per_venue,
        }
    }
}
