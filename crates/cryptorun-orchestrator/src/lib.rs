//! cryptorun-orchestrator
//!
//! Scan orchestrator (C9, spec.md §4.8/§5): drives Policy -> Microstructure
//! -> Orthogonalize -> Score -> Gates -> Proof for every symbol in a
//! universe against one shared per-tick regime snapshot, fans the
//! per-symbol work out over a bounded worker pool, ranks the results, and
//! emits the JSONL candidate stream.

mod candidate;
mod inputs;
mod manifest;
mod pipeline;
mod run;

pub use candidate::{rank_candidates, ScanCandidate};
pub use inputs::{GateSignalInputs, SymbolScanInput, VenueReferenceData};
pub use manifest::{manifest_path, ScanRunManifest};
pub use pipeline::{best_vadr, build_proof_bundle, eligibility_from_bundles, policy_precheck};
pub use run::{Orchestrator, OrchestratorConfig, ScanReport};
