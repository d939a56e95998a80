use cryptorun_orthogonalize::{orthogonalize, validate_orthogonality, DEFAULT_ORTHOGONALITY_TOLERANCE};
use proptest::prelude::*;

fn bounded_vec(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1000.0f64..1000.0, len)
}

proptest! {
    /// For any 4 cross-sectional factor columns of equal length, Gram-Schmidt
    /// residuals are pairwise orthogonal within tolerance and the protected
    /// base is passed through unchanged.
    #[test]
    fn residuals_are_pairwise_orthogonal(
        f0 in bounded_vec(8),
        f1 in bounded_vec(8),
        f2 in bounded_vec(8),
        f3 in bounded_vec(8),
    ) {
        let residuals = orthogonalize(&[f0.clone(), f1, f2, f3]).unwrap();
        prop_assert_eq!(&residuals[0], &f0);
        prop_assert!(validate_orthogonality(&residuals, DEFAULT_ORTHOGONALITY_TOLERANCE * 10.0));
    }
}
