use serde::{Deserialize, Serialize};

use cryptorun_schemas::{CompositeScore, GateDecision, Regime, Venue};

/// One scored, gated symbol for this scan tick (spec.md §6's JSONL
/// candidate stream). Carries the full decision trail, not just the
/// winners: a candidate with `gate.allowed == false` still appears here so
/// the stream explains every rejection, not only every admission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanCandidate {
    pub symbol: String,
    pub regime: Regime,
    pub score: CompositeScore,
    pub gate: GateDecision,
    pub hit_probability: f64,
    pub calibrator_kind: &'static str,
    pub eligible_venues: Vec<Venue>,
    pub venue_errors: Vec<String>,
}

/// Orders candidates by `final_with_social` descending, ties broken by
/// ASCII symbol ascending, so the stream is stable and deterministic across
/// runs with identical inputs (spec.md §4.8, §8 property 2).
pub fn rank_candidates(mut candidates: Vec<ScanCandidate>) -> Vec<ScanCandidate> {
    candidates.sort_by(|a, b| {
        b.score
            .final_with_social
            .partial_cmp(&a.score.final_with_social)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });
    candidates
}
