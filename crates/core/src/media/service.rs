//! Media asset lifecycle service.

use std::path::Path;
use std::sync::Arc;

use tracing::warn;

use opina_shared::CloudinaryConfig;

use super::error::MediaError;
use super::options::UploadOptions;
use super::resolver;
use super::store::ImageStore;

/// Media asset lifecycle service.
///
/// Orchestrates stage-local-file, upload-with-transformation, best-effort
/// local cleanup, and remote deletion. Holds an immutable copy of the store
/// configuration; operations are safe to invoke concurrently across
/// different identifiers.
pub struct MediaService<S: ImageStore> {
    store: Arc<S>,
    config: CloudinaryConfig,
}

impl<S: ImageStore> MediaService<S> {
    /// Create a new media service.
    #[must_use]
    pub fn new(store: Arc<S>, config: CloudinaryConfig) -> Self {
        Self { store, config }
    }

    /// Upload a locally staged file under the given public name.
    ///
    /// The file is uploaded with the fixed avatar transformation pipeline
    /// (400x400 face-aware crop, then automatic quality/format). On success
    /// the staged file is deleted best-effort; a cleanup failure is logged
    /// and never undoes the committed upload. Returns the public name as the
    /// asset identifier; the store derives the qualified path from
    /// folder + public name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty path (before any filesystem or
    /// network access), `FileNotFound` when the resolved path does not
    /// exist, `UploadRejected` when the store reports an in-band error, and
    /// `Transport` for any other network failure.
    pub async fn upload_image(
        &self,
        local_path: &str,
        public_name: &str,
    ) -> Result<String, MediaError> {
        if local_path.is_empty() {
            return Err(MediaError::invalid_input("no file path provided"));
        }

        // Caller-supplied paths may use either separator convention.
        let normalized = local_path.replace('\\', "/");
        let resolved = std::path::absolute(Path::new(&normalized))
            .map_err(|e| MediaError::invalid_input(e.to_string()))?;

        if !tokio::fs::try_exists(&resolved).await.unwrap_or(false) {
            return Err(MediaError::file_not_found(resolved.display().to_string()));
        }

        let bytes =
            tokio::fs::read(&resolved)
                .await
                .map_err(|source| MediaError::LocalIo {
                    path: resolved.display().to_string(),
                    source,
                })?;

        let options = UploadOptions::avatar(public_name, &self.config.folder);
        self.store.upload(bytes, &options).await?;

        // Upload success must not be undone by a cleanup failure.
        if let Err(err) = tokio::fs::remove_file(&resolved).await {
            warn!(
                path = %resolved.display(),
                error = %err,
                "could not delete staged file after upload"
            );
        }

        Ok(public_name.to_string())
    }

    /// Delete the asset referenced by the identifier.
    ///
    /// Returns `true` immediately, with no store call, when the identifier
    /// is empty or equals the configured default avatar identifier (defaults
    /// are never deletable). Otherwise the identifier is qualified exactly
    /// as the resolver does and the remote outcome is reported as a boolean.
    /// Never raises; any transport failure is logged and reported as
    /// `false`. A `false` result means the asset may or may not have been
    /// removed remotely.
    pub async fn delete_image(&self, identifier: &str) -> bool {
        // Comparison is against the raw configured value, not the qualified
        // form.
        if identifier.is_empty() || identifier == self.config.default_avatar_path {
            return true;
        }

        let public_id = resolver::qualify(identifier, &self.config.folder);
        match self.store.destroy(&public_id).await {
            Ok(outcome) => outcome == "ok",
            Err(err) => {
                warn!(identifier, error = %err, "remote delete failed");
                false
            }
        }
    }

    /// Resolve an asset identifier to a public URL.
    #[must_use]
    pub fn resolve_url(&self, identifier: Option<&str>) -> String {
        resolver::resolve_url(&self.config, identifier)
    }

    /// Resolve the default avatar URL.
    #[must_use]
    pub fn default_avatar_url(&self) -> String {
        resolver::default_avatar_url(&self.config)
    }

    /// Derive the default avatar identifier from configuration.
    #[must_use]
    pub fn default_avatar_id(&self) -> String {
        resolver::default_avatar_id(&self.config)
    }

    /// Get the store configuration.
    #[must_use]
    pub fn config(&self) -> &CloudinaryConfig {
        &self.config
    }
}
