/// Number of equal-frequency bins used to estimate calibration error.
pub const DEFAULT_VALIDATION_BINS: usize = 10;
pub const MAX_CALIBRATION_ERROR: f64 = 0.10;
pub const MIN_AUC: f64 = 0.55;

/// Holdout validation result for a single refit attempt (spec.md §4.9).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalibrationValidation {
    pub calibration_error: f64,
    pub auc: f64,
    pub passed: bool,
}

impl CalibrationValidation {
    pub fn evaluate(predictions: &[(f64, bool)]) -> Self {
        let calibration_error = compute_calibration_error(predictions, DEFAULT_VALIDATION_BINS);
        let auc = compute_auc(predictions);
        let passed = calibration_error <= MAX_CALIBRATION_ERROR && auc >= MIN_AUC;
        Self { calibration_error, auc, passed }
    }
}

/// Mean absolute difference between predicted probability and empirical
/// hit-rate across `num_bins` equal-frequency bins (sorted by predicted
/// probability). Empty input is treated as maximally miscalibrated.
pub fn compute_calibration_error(predictions: &[(f64, bool)], num_bins: usize) -> f64 {
    if predictions.is_empty() {
        return 1.0;
    }
    let mut sorted = predictions.to_vec();
    sorted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let bins = num_bins.min(n).max(1);

    let mut total_abs_diff = 0.0;
    let mut used_bins = 0usize;
    for i in 0..bins {
        let start = i * n / bins;
        let end = ((i + 1) * n / bins).max(start + 1).min(n);
        let slice = &sorted[start..end];
        if slice.is_empty() {
            continue;
        }
        let mean_pred: f64 = slice.iter().map(|&(p, _)| p).sum::<f64>() / slice.len() as f64;
        let empirical: f64 = slice.iter().filter(|&&(_, hit)| hit).count() as f64 / slice.len() as f64;
        total_abs_diff += (mean_pred - empirical).abs();
        used_bins += 1;
    }

    if used_bins == 0 { 1.0 } else { total_abs_diff / used_bins as f64 }
}

/// Rank-based AUC (Mann-Whitney form): fraction of (positive, negative)
/// pairs the predictor ranks correctly, ties counted as half a win.
/// Returns 0.5 (uninformative) when either class is absent.
pub fn compute_auc(predictions: &[(f64, bool)]) -> f64 {
    let positives: Vec<f64> = predictions.iter().filter(|&&(_, hit)| hit).map(|&(p, _)| p).collect();
    let negatives: Vec<f64> = predictions.iter().filter(|&&(_, hit)| !hit).map(|&(p, _)| p).collect();
    if positives.is_empty() || negatives.is_empty() {
        return 0.5;
    }

    let mut wins = 0.0;
    for &p in &positives {
        for &n in &negatives {
            if p > n {
                wins += 1.0;
            } else if (p - n).abs() < 1e-12 {
                wins += 0.5;
            }
        }
    }
    wins / (positives.len() as f64 * negatives.len() as f64)
}
