//! Profile media error types.

use thiserror::Error;

use crate::media::MediaError;

/// Profile media operation errors.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Media upload failed. The caller decides whether to retain the prior
    /// identifier.
    #[error("media error: {0}")]
    Media(#[from] MediaError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl ProfileError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}
