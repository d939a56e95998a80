//! cryptorun-regime
//!
//! Majority-vote regime detector (C3) and per-regime weight preset manager
//! (C4), spec.md §4.3. Pure decision function plus `tokio::sync::RwLock`
//! guarded managers for the process-resident state.

mod detect;
mod manager;
mod weights;

pub use detect::{apply_decision, cast_votes, decide, RegimeSignals};
pub use manager::{RegimeManager, DEFAULT_CADENCE_SECS};
pub use weights::{default_preset, WeightManager};
