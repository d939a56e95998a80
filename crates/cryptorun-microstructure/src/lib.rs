//! cryptorun-microstructure
//!
//! Spread/depth/VADR/data-quality/staleness/market-impact validation over
//! L1+L2 order-book snapshots (spec.md §4.2). Pure, single-pass, no
//! cross-symbol coupling.

mod thresholds;
mod validate;

pub use thresholds::{MicrostructureProfile, MicrostructureThresholds, SourceTier};
pub use validate::{validate, MicrostructureInputs};
