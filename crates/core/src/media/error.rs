//! Media error types.

use thiserror::Error;

use opina_shared::AppError;

/// Media asset operation errors.
///
/// Only upload-path failures appear here; delete failures are absorbed into
/// a boolean outcome and never raised (see `MediaService::delete_image`).
#[derive(Debug, Error)]
pub enum MediaError {
    /// Required argument missing or empty. Raised before any filesystem or
    /// network access.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Locally staged file absent at upload time. Raised before any network
    /// call.
    #[error("local file not found: {path}")]
    FileNotFound {
        /// Resolved local path that was checked.
        path: String,
    },

    /// Staged file could not be read after the existence check.
    #[error("failed to read staged file {path}: {source}")]
    LocalIo {
        /// Resolved local path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The remote store reported an in-band error despite a successful
    /// transport response.
    #[error("remote store rejected upload: {0}")]
    UploadRejected(String),

    /// Network or protocol failure talking to the remote store.
    #[error("remote store request failed: {0}")]
    Transport(String),
}

impl MediaError {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a file not found error.
    #[must_use]
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create an upload rejected error.
    #[must_use]
    pub fn upload_rejected(msg: impl Into<String>) -> Self {
        Self::UploadRejected(msg.into())
    }

    /// Create a transport error.
    #[must_use]
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

impl From<reqwest::Error> for MediaError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::InvalidInput(msg) => Self::Validation(msg),
            MediaError::FileNotFound { path } => Self::NotFound(path),
            err @ MediaError::LocalIo { .. } => Self::Internal(err.to_string()),
            err @ (MediaError::UploadRejected(_) | MediaError::Transport(_)) => {
                Self::ExternalService(err.to_string())
            }
        }
    }
}
