//! cryptorun-schemas
//!
//! Shared value objects and data-model types for the CryptoRun momentum
//! signal engine: symbols, venues, order-book snapshots, factor bundles,
//! regime state, composite scores, gate decisions, and proof bundles.
//!
//! Deterministic, pure data. No IO, no network, no wall-clock reads.

mod factor;
mod gate;
mod microstructure;
mod proof;
mod reason;
mod regime;
mod score;
mod snapshot;
mod symbol;
mod venue;
mod weight;

pub use factor::{FactorBundle, FactorKind, ResidualFactors};
pub use gate::GateDecision;
pub use microstructure::{MicrostructureMetrics, Recommendation, ValidationResult};
pub use proof::{AssetEligibilityResult, MasterProofBundle, ProofBundle};
pub use reason::{Operator, ReasonCode, ValidationProof};
pub use regime::{Regime, RegimeChange, RegimeState, Vote};
pub use score::{CompositeScore, ScoreContribution};
pub use snapshot::{L1Snapshot, L2Level, L2Snapshot};
pub use symbol::{is_well_formed_usd_quote, Symbol, SymbolError};
pub use venue::{DataSource, DataType, Venue, BANNED_AGGREGATORS};
pub use weight::{MovementGate, WeightPreset};
