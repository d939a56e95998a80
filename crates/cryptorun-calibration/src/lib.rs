//! cryptorun-calibration
//!
//! Per-regime score-to-probability calibration (C10, spec.md §4.9): an
//! isotonic (PAV) fit validated on a held-out slice of each regime's
//! sample buffer, falling back to a fixed sigmoid until a fit earns
//! acceptance. Pure in-memory state; callers own cadence, persistence, and
//! sample collection.

mod harness;
mod isotonic;
mod sample;
mod validation;

pub use harness::{CalibrationHarness, DEFAULT_MAX_SAMPLES, DEFAULT_MIN_REFIT_SAMPLES, DEFAULT_TARGET_MOVE_PCT};
pub use isotonic::{sigmoid_fallback, IsotonicCalibrator};
pub use sample::CalibrationSample;
pub use validation::{compute_auc, compute_calibration_error, CalibrationValidation, DEFAULT_VALIDATION_BINS, MAX_CALIBRATION_ERROR, MIN_AUC};
