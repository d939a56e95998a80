use std::collections::{BTreeMap, VecDeque};

use cryptorun_schemas::Regime;

use crate::isotonic::{sigmoid_fallback, IsotonicCalibrator};
use crate::sample::CalibrationSample;
use crate::validation::CalibrationValidation;

pub const DEFAULT_MAX_SAMPLES: usize = 2_000;
pub const DEFAULT_MIN_REFIT_SAMPLES: usize = 50;
pub const DEFAULT_TARGET_MOVE_PCT: f64 = 5.0;
/// Fraction of each regime's buffer, by insertion order, held out for
/// validation rather than trained on (spec.md §4.9).
const HOLDOUT_FRACTION: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Calibrator {
    Fallback,
    Isotonic(f64, f64), // calibration_error, auc recorded alongside the fit
}

/// Per-regime isotonic calibrator bank with a bounded sample buffer and a
/// cadence-driven refit/validate/accept-or-reject cycle (spec.md §4.9).
///
/// `maybe_refit` never touches the network or filesystem: the orchestrator
/// decides cadence and supplies samples via `record_sample`.
pub struct CalibrationHarness {
    max_samples: usize,
    min_refit_samples: usize,
    target_move_pct: f64,
    buffers: BTreeMap<Regime, VecDeque<CalibrationSample>>,
    fits: BTreeMap<Regime, IsotonicCalibrator>,
    last_validation: BTreeMap<Regime, CalibrationValidation>,
    samples_since_refit: BTreeMap<Regime, usize>,
}

impl CalibrationHarness {
    pub fn new(max_samples: usize, min_refit_samples: usize, target_move_pct: f64) -> Self {
        Self {
            max_samples,
            min_refit_samples,
            target_move_pct,
            buffers: BTreeMap::new(),
            fits: BTreeMap::new(),
            last_validation: BTreeMap::new(),
            samples_since_refit: BTreeMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_MAX_SAMPLES, DEFAULT_MIN_REFIT_SAMPLES, DEFAULT_TARGET_MOVE_PCT)
    }

    /// Appends a sample to its regime's ring buffer, evicting the oldest
    /// entry once `max_samples` is exceeded.
    pub fn record_sample(&mut self, sample: CalibrationSample) {
        let buf = self.buffers.entry(sample.regime).or_default();
        buf.push_back(sample);
        while buf.len() > self.max_samples {
            buf.pop_front();
        }
        *self.samples_since_refit.entry(sample.regime).or_insert(0) += 1;
    }

    /// Refits every regime whose buffer has accumulated at least
    /// `min_refit_samples` new observations since its last refit attempt.
    /// Returns true iff at least one regime's fit changed.
    pub fn maybe_refit(&mut self) -> bool {
        let due: Vec<Regime> = self
            .samples_since_refit
            .iter()
            .filter(|&(_, &count)| count >= self.min_refit_samples)
            .map(|(&regime, _)| regime)
            .collect();

        let mut any = false;
        for regime in due {
            if self.refit(regime) {
                any = true;
            }
            self.samples_since_refit.insert(regime, 0);
        }
        any
    }

    fn refit(&mut self, regime: Regime) -> bool {
        let Some(buf) = self.buffers.get(&regime) else { return false };
        if buf.len() < self.min_refit_samples {
            return false;
        }

        let n = buf.len();
        let holdout_len = ((n as f64 * HOLDOUT_FRACTION).floor() as usize).max(1);
        let split = n - holdout_len;
        if split == 0 {
            return false;
        }

        let train: Vec<(f64, bool)> = buf
            .iter()
            .take(split)
            .map(|s| (s.score, s.is_hit(self.target_move_pct)))
            .collect();
        let holdout: Vec<(f64, bool)> = buf
            .iter()
            .skip(split)
            .map(|s| (s.score, s.is_hit(self.target_move_pct)))
            .collect();
        if holdout.is_empty() {
            return false;
        }

        let candidate = IsotonicCalibrator::fit(&train);
        let predictions: Vec<(f64, bool)> = holdout.iter().map(|&(score, hit)| (candidate.predict(score), hit)).collect();
        let validation = CalibrationValidation::evaluate(&predictions);
        self.last_validation.insert(regime, validation);

        if validation.passed {
            self.fits.insert(regime, candidate);
            true
        } else {
            self.fits.remove(&regime);
            false
        }
    }

    /// Predicted hit probability for `score` in `regime`: the regime's
    /// validated isotonic fit if one exists, else the sigmoid fallback.
    pub fn predict(&self, regime: Regime, score: f64) -> f64 {
        match self.fits.get(&regime) {
            Some(fit) if !fit.is_empty() => fit.predict(score),
            _ => sigmoid_fallback(score),
        }
    }

    pub fn calibrator_kind(&self, regime: Regime) -> &'static str {
        match self.fits.get(&regime) {
            Some(fit) if !fit.is_empty() => "isotonic",
            _ => "sigmoid_fallback",
        }
    }

    pub fn sample_count(&self, regime: Regime) -> usize {
        self.buffers.get(&regime).map(|b| b.len()).unwrap_or(0)
    }

    pub fn last_validation(&self, regime: Regime) -> Option<CalibrationValidation> {
        self.last_validation.get(&regime).copied()
    }
}

impl Default for CalibrationHarness {
    fn default() -> Self {
        Self::with_defaults()
    }
}
