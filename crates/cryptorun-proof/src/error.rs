use std::path::PathBuf;

/// ArtifactWriteFailure (spec.md §7): the rename step gets a single retry;
/// a second failure surfaces this error while the in-memory decision is
/// preserved by the caller (no partial artifact is left behind).
#[derive(Debug, thiserror::Error)]
pub enum ProofWriteError {
    #[error("serialize artifact for {path:?} failed: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("create parent dir for {path:?} failed: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write temp file {path:?} failed: {source}")]
    WriteTemp {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("rename {tmp_path:?} -> {final_path:?} failed after one retry: {source}")]
    Rename {
        tmp_path: PathBuf,
        final_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
