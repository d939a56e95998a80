use thiserror::Error;

/// Errors a [`crate::VenueClient`] / [`crate::DetectorInputs`] implementation
/// may return. Per-venue failures are recorded into `VenueErrors[]` by the
/// orchestrator (spec.md §7 `VenueFetchFailure`) rather than failing the
/// whole symbol.
#[derive(Debug, Error)]
pub enum VenueError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("venue api error status={status}: {message}")]
    Api { status: u16, message: String },

    #[error("response decode error: {0}")]
    Decode(String),

    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),
}
