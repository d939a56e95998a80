//! cryptorun-orthogonalize
//!
//! Gram-Schmidt orthogonalization with a protected base factor (spec.md
//! §4.4). Operates on cross-sectional factor columns (one value per symbol
//! per factor), not per-symbol scalar tuples — the caller (the composite
//! scorer) assembles the universe-wide columns and scatters residuals back
//! per symbol. Plain functions over `&[f64]`, no I/O, explicit numeric
//! guards — grounded on `mqk-promotion/src/evaluator.rs`'s pure-math style.

mod error;

pub use error::OrthogonalizerError;

pub const DEFAULT_ORTHOGONALITY_TOLERANCE: f64 = 0.01;

pub fn dot(u: &[f64], v: &[f64]) -> f64 {
    u.iter().zip(v.iter()).map(|(a, b)| a * b).sum()
}

pub fn norm(v: &[f64]) -> f64 {
    dot(v, v).sqrt()
}

/// `proj(u, v) = (⟨u,v⟩ / ⟨u,u⟩) u`, with a zero-norm guard returning `v`
/// unchanged when `⟨u,u⟩` is (numerically) zero.
fn project(u: &[f64], v: &[f64]) -> Vec<f64> {
    let denom = dot(u, u);
    if denom.abs() < f64::EPSILON {
        return v.to_vec();
    }
    let scale = dot(u, v) / denom;
    u.iter().map(|x| x * scale).collect()
}

/// Gram-Schmidt over an ordered factor list `[F0(protected), F1, F2, ...]`.
/// `R0 = F0` unchanged; `R_i = F_i - sum_{j<i} proj(R_j, F_i)` for `i >= 1`.
pub fn orthogonalize(factors: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, OrthogonalizerError> {
    let Some(first) = factors.first() else {
        return Err(OrthogonalizerError::Empty);
    };
    let expected_len = first.len();
    for f in factors.iter() {
        if f.len() != expected_len {
            return Err(OrthogonalizerError::InconsistentLengths {
                expected: expected_len,
                actual: f.len(),
            });
        }
    }

    let mut residuals: Vec<Vec<f64>> = Vec::with_capacity(factors.len());
    residuals.push(factors[0].clone());

    for f_i in factors.iter().skip(1) {
        let mut r_i = f_i.clone();
        for r_j in residuals.iter() {
            let p = project(r_j, f_i);
            for (x, p_x) in r_i.iter_mut().zip(p.iter()) {
                *x -= p_x;
            }
        }
        residuals.push(r_i);
    }

    if residuals[0] != factors[0] {
        return Err(OrthogonalizerError::ProtectedBaseModified);
    }

    Ok(residuals)
}

/// `max_{i != j} |<R_i, R_j>| / (||R_i|| * ||R_j||)`, or `0.0` when fewer
/// than two residuals are given.
pub fn max_pairwise_correlation(residuals: &[Vec<f64>]) -> f64 {
    let mut max_corr = 0.0f64;
    for i in 0..residuals.len() {
        for j in (i + 1)..residuals.len() {
            let ni = norm(&residuals[i]);
            let nj = norm(&residuals[j]);
            if ni < f64::EPSILON || nj < f64::EPSILON {
                continue;
            }
            let corr = (dot(&residuals[i], &residuals[j]) / (ni * nj)).abs();
            max_corr = max_corr.max(corr);
        }
    }
    max_corr
}

/// Validates `max_pairwise_correlation(residuals) < tolerance`.
pub fn validate_orthogonality(residuals: &[Vec<f64>], tolerance: f64) -> bool {
    max_pairwise_correlation(residuals) < tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_base_is_unchanged() {
        let f0 = vec![1.0, 2.0, 3.0];
        let f1 = vec![2.0, 4.0, 6.0]; // parallel to f0
        let residuals = orthogonalize(&[f0.clone(), f1]).unwrap();
        assert_eq!(residuals[0], f0);
    }

    #[test]
    fn parallel_factor_residualizes_to_near_zero() {
        let f0 = vec![1.0, 2.0, 3.0];
        let f1 = vec![2.0, 4.0, 6.0];
        let residuals = orthogonalize(&[f0, f1]).unwrap();
        let r1_norm = norm(&residuals[1]);
        assert!(r1_norm < 1e-9, "r1_norm={r1_norm}");
    }

    #[test]
    fn orthogonal_inputs_pass_validation() {
        let f0 = vec![1.0, 0.0, 0.0];
        let f1 = vec![0.0, 1.0, 0.0];
        let f2 = vec![0.0, 0.0, 1.0];
        let residuals = orthogonalize(&[f0, f1, f2]).unwrap();
        assert!(validate_orthogonality(&residuals, DEFAULT_ORTHOGONALITY_TOLERANCE));
        assert!(max_pairwise_correlation(&residuals) < 1e-9);
    }

    #[test]
    fn zero_norm_base_leaves_dependent_factor_unchanged() {
        let f0 = vec![0.0, 0.0, 0.0];
        let f1 = vec![5.0, 6.0, 7.0];
        let residuals = orthogonalize(&[f0, f1.clone()]).unwrap();
        assert_eq!(residuals[1], f1);
    }

    #[test]
    fn inconsistent_lengths_rejected() {
        let f0 = vec![1.0, 2.0, 3.0];
        let f1 = vec![1.0, 2.0];
        let err = orthogonalize(&[f0, f1]).unwrap_err();
        assert_eq!(
            err,
            OrthogonalizerError::InconsistentLengths { expected: 3, actual: 2 }
        );
    }

    #[test]
    fn empty_input_rejected() {
        assert_eq!(orthogonalize(&[]).unwrap_err(), OrthogonalizerError::Empty);
    }

    #[test]
    fn general_three_factor_case_is_pairwise_orthogonal() {
        let f0 = vec![1.0, 1.0, 0.0, 0.0];
        let f1 = vec![1.0, 0.0, 1.0, 0.0];
        let f2 = vec![0.0, 1.0, 1.0, 1.0];
        let residuals = orthogonalize(&[f0, f1, f2]).unwrap();
        assert!(validate_orthogonality(&residuals, DEFAULT_ORTHOGONALITY_TOLERANCE));
    }
}
