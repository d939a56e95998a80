use serde::{Deserialize, Serialize};

use crate::reason::ValidationProof;
use crate::snapshot::{L1Snapshot, L2Snapshot};
use crate::venue::Venue;

/// Per-venue microstructure evidence bundle (spec.md §4.8, §6).
///
/// `proof_id` is `"{symbol}_{venue}_{unix_seconds}"`, matching the naming
/// convention artifacts are written under (C8).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProofBundle {
    pub proof_id: String,
    pub symbol: String,
    pub venue: Venue,
    pub l1: L1Snapshot,
    pub l2: Option<L2Snapshot>,
    pub spread_proof: ValidationProof,
    pub depth_proof: ValidationProof,
    pub vadr_proof: ValidationProof,
    pub generated_at: i64,
}

impl ProofBundle {
    pub fn new(
        symbol: &str,
        venue: Venue,
        l1: L1Snapshot,
        l2: Option<L2Snapshot>,
        spread_proof: ValidationProof,
        depth_proof: ValidationProof,
        vadr_proof: ValidationProof,
        generated_at: i64,
    ) -> Self {
        let proof_id = format!("{symbol}_{venue}_{generated_at}");
        Self {
            proof_id,
            symbol: symbol.to_string(),
            venue,
            l1,
            l2,
            spread_proof,
            depth_proof,
            vadr_proof,
            generated_at,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.spread_proof.passed && self.depth_proof.passed && self.vadr_proof.passed
    }
}

/// Aggregates every venue's [`ProofBundle`] checked for one symbol at one
/// scan tick (spec.md §4.8).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MasterProofBundle {
    pub symbol: String,
    pub checked_at: i64,
    pub venue_bundles: Vec<ProofBundle>,
}

impl MasterProofBundle {
    pub fn eligible_venues(&self) -> Vec<Venue> {
        self.venue_bundles
            .iter()
            .filter(|b| b.all_passed())
            .map(|b| b.venue)
            .collect()
    }

    pub fn any_eligible(&self) -> bool {
        self.venue_bundles.iter().any(|b| b.all_passed())
    }
}

/// Final per-symbol eligibility verdict, combining every venue checked
/// (spec.md §4.8 / §6).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetEligibilityResult {
    pub symbol: String,
    pub checked_at: i64,
    pub overall_eligible: bool,
    pub eligible_venues: Vec<Venue>,
    pub venue_errors: Vec<String>,
    pub master: MasterProofBundle,
}

impl AssetEligibilityResult {
    pub fn from_master(master: MasterProofBundle, venue_errors: Vec<String>) -> Self {
        let eligible_venues = master.eligible_venues();
        let overall_eligible = !eligible_venues.is_empty();
        Self {
            symbol: master.symbol.clone(),
            checked_at: master.checked_at,
            overall_eligible,
            eligible_venues,
            venue_errors,
            master,
        }
    }
}
