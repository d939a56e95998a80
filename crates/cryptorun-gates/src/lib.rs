//! cryptorun-gates
//!
//! Hard entry gate battery (C7, spec.md §4.6): a candidate is admitted iff
//! every gate passes. Grounded directly on `mqk-risk/src/engine.rs`'s
//! `evaluate()`: ordered checks, each producing a structured proof; unlike
//! the risk engine there is no sticky state here — gates are pure per-tick.

mod checks;
mod config;
mod inputs;

pub use checks::evaluate_all;
pub use config::GateConfig;
pub use cryptorun_schemas::GateDecision;
pub use inputs::GateInputs;

/// Runs the full cascade and folds it into a [`GateDecision`].
pub fn evaluate(cfg: &GateConfig, inputs: &GateInputs) -> GateDecision {
    GateDecision::from_cascade(evaluate_all(cfg, inputs))
}
