use cryptorun_orthogonalize::OrthogonalizerError;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("no symbols in universe")]
    EmptyUniverse,

    #[error("orthogonalization failed: {0}")]
    Orthogonalize(#[from] OrthogonalizerError),
}
