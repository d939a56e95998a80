/// Pool-adjacent-violators fit over `(score, hit)` pairs, producing a
/// monotone non-decreasing step function from score to hit probability.
///
/// Grounded on `mqk-promotion/src/evaluator.rs`'s style of small, pure
/// numeric helpers with explicit guards (`mean_std`'s zero-length guard) --
/// this is the same shape applied to isotonic regression instead of
/// backtest-metric aggregation.
#[derive(Clone, Debug, PartialEq)]
pub struct IsotonicCalibrator {
    /// Ascending by score; `predict` steps to the last point at or below
    /// the queried score.
    points: Vec<(f64, f64)>,
}

impl IsotonicCalibrator {
    /// `samples` need not be pre-sorted; `fit` sorts a local copy by score.
    pub fn fit(samples: &[(f64, bool)]) -> Self {
        if samples.is_empty() {
            return Self { points: Vec::new() };
        }
        let mut sorted: Vec<(f64, bool)> = samples.to_vec();
        sorted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let ys: Vec<f64> = sorted.iter().map(|&(_, hit)| if hit { 1.0 } else { 0.0 }).collect();
        let fitted = pool_adjacent_violators(&ys);

        let points = sorted.iter().zip(fitted).map(|(&(score, _), prob)| (score, prob)).collect();
        Self { points }
    }

    /// Step-function lookup: returns the fitted probability of the last
    /// training point at or below `score`, or the lowest/highest fitted
    /// value when `score` falls outside the training range.
    pub fn predict(&self, score: f64) -> f64 {
        let Some(&(_, first)) = self.points.first() else {
            return 0.5;
        };
        let mut result = first;
        for &(s, p) in &self.points {
            if s <= score {
                result = p;
            } else {
                break;
            }
        }
        result
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Classic block-merging PAV: walk `ys` left to right, push a new
/// single-element block, then merge back while the new block's mean is
/// below its predecessor's (a monotonicity violation).
fn pool_adjacent_violators(ys: &[f64]) -> Vec<f64> {
    let mut blocks: Vec<(f64, f64)> = Vec::new(); // (mean, weight)

    for &y in ys {
        blocks.push((y, 1.0));
        while blocks.len() >= 2 {
            let n = blocks.len();
            let (v2, w2) = blocks[n - 1];
            let (v1, w1) = blocks[n - 2];
            if v1 > v2 {
                let merged_w = w1 + w2;
                let merged_v = (v1 * w1 + v2 * w2) / merged_w;
                blocks.truncate(n - 2);
                blocks.push((merged_v, merged_w));
            } else {
                break;
            }
        }
    }

    let mut out = Vec::with_capacity(ys.len());
    for (v, w) in blocks {
        for _ in 0..(w.round() as usize) {
            out.push(v);
        }
    }
    out
}

/// `P = 1 / (1 + exp(-(score - 75) / 10))` (spec.md §4.9): the fallback used
/// for a regime whose isotonic fit has never passed validation.
pub fn sigmoid_fallback(score: f64) -> f64 {
    1.0 / (1.0 + (-(score - 75.0) / 10.0).exp())
}
