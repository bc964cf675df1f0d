//! CA proxy domain error types.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CaError {
    /// A directory, binary, or file the operation depends on is absent
    /// (or unreadable where the contract requires it to decode).
    #[error("missing resource at {path}: {detail}")]
    MissingResource { path: PathBuf, detail: String },

    /// The external CA command exited nonzero for a reason other than
    /// "certificate not present". Carries the full captured output.
    #[error("command `{command}` failed: {output}")]
    CommandFailure { command: String, output: String },

    /// The targeted certificate or autosign entry does not exist.
    /// A distinguished, expected outcome that callers may treat as
    /// non-fatal.
    #[error("not present: {0}")]
    NotPresent(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CaError {
    pub(crate) fn missing(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self::MissingResource {
            path: path.into(),
            detail: detail.into(),
        }
    }
}
