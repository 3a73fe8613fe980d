//! Profile media orchestration.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use super::error::ProfileError;
use crate::media::{ImageStore, MediaService};

/// Repository trait for the owning user record's avatar field.
///
/// Implemented by the persistence layer. The persisted state is a single
/// mutable identifier: present means a custom avatar, absent means the
/// implicit default.
pub trait AvatarRepository: Send + Sync {
    /// Read the current avatar identifier for a user.
    fn avatar_id(
        &self,
        user_id: Uuid,
    ) -> impl std::future::Future<Output = Result<Option<String>, ProfileError>> + Send;

    /// Persist a new avatar identifier for a user, or clear it with `None`.
    fn set_avatar_id(
        &self,
        user_id: Uuid,
        identifier: Option<&str>,
    ) -> impl std::future::Future<Output = Result<(), ProfileError>> + Send;
}

/// Profile media service composing uploads with identifier persistence.
///
/// Two concurrent updates for the same user race on which identifier is
/// persisted last; last write wins, no locking.
pub struct ProfileMediaService<S: ImageStore, R: AvatarRepository> {
    media: Arc<MediaService<S>>,
    repo: Arc<R>,
}

impl<S: ImageStore, R: AvatarRepository> ProfileMediaService<S, R> {
    /// Create a new profile media service.
    #[must_use]
    pub fn new(media: Arc<MediaService<S>>, repo: Arc<R>) -> Self {
        Self { media, repo }
    }

    /// Upload a new avatar for the user and persist its identifier.
    ///
    /// The previously persisted identifier is deleted best-effort after the
    /// new one is committed; a failed deletion is logged, not raised.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload or the persistence write fails. The
    /// prior identifier is retained in both cases.
    pub async fn update_avatar(
        &self,
        user_id: Uuid,
        staged_path: &str,
        public_name: &str,
    ) -> Result<String, ProfileError> {
        let previous = self.repo.avatar_id(user_id).await?;

        let identifier = self.media.upload_image(staged_path, public_name).await?;
        self.repo.set_avatar_id(user_id, Some(&identifier)).await?;

        if let Some(old) = previous.filter(|old| old != &identifier) {
            if !self.media.delete_image(&old).await {
                warn!(%user_id, identifier = %old, "superseded avatar may not have been removed remotely");
            }
        }

        Ok(identifier)
    }

    /// Remove the user's custom avatar, reverting to the implicit default.
    ///
    /// # Errors
    ///
    /// Returns an error if the persistence write fails. The remote deletion
    /// is best-effort and never fails the removal.
    pub async fn remove_avatar(&self, user_id: Uuid) -> Result<(), ProfileError> {
        let current = self.repo.avatar_id(user_id).await?;
        self.repo.set_avatar_id(user_id, None).await?;

        if let Some(identifier) = current {
            if !self.media.delete_image(&identifier).await {
                warn!(%user_id, %identifier, "removed avatar may not have been deleted remotely");
            }
        }

        Ok(())
    }

    /// Resolve the user's displayable avatar URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository read fails.
    pub async fn avatar_url(&self, user_id: Uuid) -> Result<String, ProfileError> {
        let identifier = self.repo.avatar_id(user_id).await?;
        Ok(self.media.resolve_url(identifier.as_deref()))
    }
}
