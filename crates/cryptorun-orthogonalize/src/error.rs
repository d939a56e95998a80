#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OrthogonalizerError {
    #[error("factor vectors have inconsistent lengths: expected {expected}, got {actual}")]
    InconsistentLengths { expected: usize, actual: usize },

    #[error("protected base factor (index 0) was modified during orthogonalization")]
    ProtectedBaseModified,

    #[error("no factors given")]
    Empty,
}
