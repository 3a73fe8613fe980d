//! Remote image store client.
//!
//! Thin transport adapter over a Cloudinary-compatible HTTP API. Requests
//! are signed with the account secret; the `ImageStore` trait is the seam
//! the lifecycle service is tested through.

use chrono::Utc;
use serde::Deserialize;
use sha1::{Digest, Sha1};
use tracing::warn;

use opina_shared::CloudinaryConfig;

use super::error::MediaError;
use super::options::{UploadOptions, UploadReceipt};

/// API base for all upload/destroy calls.
const API_BASE_URL: &str = "https://api.cloudinary.com";

/// Remote image store operations.
///
/// Implemented by the transport client; tests substitute recording doubles.
pub trait ImageStore: Send + Sync {
    /// Upload raw image bytes under the given options.
    fn upload(
        &self,
        bytes: Vec<u8>,
        options: &UploadOptions,
    ) -> impl std::future::Future<Output = Result<UploadReceipt, MediaError>> + Send;

    /// Remove the asset stored under the fully qualified public identifier.
    ///
    /// Returns the store's raw outcome string (`"ok"`, `"not found"`, ...).
    /// Absence of the asset is a normal outcome, not an error.
    fn destroy(
        &self,
        public_id: &str,
    ) -> impl std::future::Future<Output = Result<String, MediaError>> + Send;
}

/// HTTP client for a Cloudinary-compatible image store.
pub struct CloudinaryStore {
    http: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

impl CloudinaryStore {
    /// Create a new store client from configuration.
    ///
    /// Relaxed TLS verification is an explicit opt-in and only affects this
    /// client's outbound calls, never the rest of the process.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &CloudinaryConfig) -> Result<Self, MediaError> {
        let mut builder = reqwest::Client::builder();
        if config.accept_invalid_certs {
            warn!("TLS certificate verification disabled for remote store requests");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder
            .build()
            .map_err(|e| MediaError::transport(e.to_string()))?;

        Ok(Self {
            http,
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        })
    }

    fn endpoint(&self, resource_type: &str, action: &str) -> String {
        format!(
            "{API_BASE_URL}/v1_1/{}/{resource_type}/{action}",
            self.cloud_name
        )
    }
}

impl ImageStore for CloudinaryStore {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        options: &UploadOptions,
    ) -> Result<UploadReceipt, MediaError> {
        let timestamp = Utc::now().timestamp().to_string();
        let transformation = options.transformation_param();
        let signature = api_sign(
            &[
                ("folder", &options.folder),
                ("public_id", &options.public_id),
                ("timestamp", &timestamp),
                ("transformation", &transformation),
            ],
            &self.api_secret,
        );

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name("file"),
            )
            .text("public_id", options.public_id.clone())
            .text("folder", options.folder.clone())
            .text("transformation", transformation)
            .text("timestamp", timestamp)
            .text("api_key", self.api_key.clone())
            .text("signature", signature);

        let response = self
            .http
            .post(self.endpoint(&options.resource_type, "upload"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if let Ok(parsed) = serde_json::from_slice::<UploadResponse>(&body) {
            // The store reports some rejections in-band with a 200 response.
            if let Some(error) = parsed.error {
                return Err(MediaError::UploadRejected(error.message));
            }
            if status.is_success() {
                if let Some(public_id) = parsed.public_id {
                    return Ok(UploadReceipt {
                        public_id,
                        secure_url: parsed.secure_url,
                    });
                }
            }
        }

        Err(MediaError::transport(format!(
            "unexpected response from remote store: {status}"
        )))
    }

    async fn destroy(&self, public_id: &str) -> Result<String, MediaError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = api_sign(
            &[("public_id", public_id), ("timestamp", &timestamp)],
            &self.api_secret,
        );

        let params = [
            ("public_id", public_id),
            ("timestamp", &timestamp),
            ("api_key", &self.api_key),
            ("signature", &signature),
        ];

        let response = self
            .http
            .post(self.endpoint("image", "destroy"))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let parsed: DestroyResponse = response.json().await.map_err(|_| {
            MediaError::transport(format!("unexpected response from remote store: {status}"))
        })?;

        parsed.result.ok_or_else(|| {
            MediaError::transport(format!("unexpected response from remote store: {status}"))
        })
    }
}

/// Sign request parameters with the account secret.
///
/// Empty values are excluded; remaining parameters are sorted by key, joined
/// as `k=v&...`, concatenated with the secret, and SHA-1 hashed.
fn api_sign(params: &[(&str, &str)], secret: &str) -> String {
    let mut params: Vec<_> = params.iter().filter(|(_, value)| !value.is_empty()).collect();
    params.sort_by_key(|(key, _)| *key);

    let payload = params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(payload.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: Option<String>,
    secure_url: Option<String>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_sign_upload_params() {
        let signature = api_sign(
            &[
                ("folder", "profiles"),
                ("public_id", "abc123"),
                ("timestamp", "1700000000"),
                ("transformation", "w_400,h_400,c_fill,g_face/q_auto,f_auto"),
            ],
            "topsecret",
        );
        assert_eq!(signature, "59d4c735c52514fabc99ea1b51fea878fe14b264");
    }

    #[test]
    fn test_api_sign_destroy_params() {
        let signature = api_sign(
            &[("public_id", "profiles/abc123"), ("timestamp", "1700000000")],
            "topsecret",
        );
        assert_eq!(signature, "0ce8706b09da17a5fc111e59849282dca96d4fb2");
    }

    #[test]
    fn test_api_sign_sorts_and_skips_empty() {
        // Order of the input slice must not matter, and empty values must
        // not participate in the signature.
        let a = api_sign(
            &[("timestamp", "1700000000"), ("public_id", "abc"), ("folder", "")],
            "s",
        );
        let b = api_sign(&[("public_id", "abc"), ("timestamp", "1700000000")], "s");
        assert_eq!(a, b);
    }

    fn config() -> CloudinaryConfig {
        CloudinaryConfig {
            cloud_name: "demo".to_string(),
            api_key: "key123".to_string(),
            api_secret: "topsecret".to_string(),
            folder: "profiles".to_string(),
            base_url: "https://res.cloudinary.com/demo/image/upload/".to_string(),
            default_avatar_path: "profiles/default-avatar.png".to_string(),
            default_avatar_filename: None,
            accept_invalid_certs: false,
        }
    }

    #[test]
    fn test_endpoint_format() {
        let store = CloudinaryStore::new(&config()).expect("should build client");
        assert_eq!(
            store.endpoint("image", "upload"),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
        assert_eq!(
            store.endpoint("image", "destroy"),
            "https://api.cloudinary.com/v1_1/demo/image/destroy"
        );
    }

    #[test]
    fn test_upload_response_in_band_error() {
        let body = br#"{"error": {"message": "Invalid image file"}}"#;
        let parsed: UploadResponse = serde_json::from_slice(body).expect("should parse");
        assert_eq!(parsed.error.expect("error present").message, "Invalid image file");
    }

    #[test]
    fn test_upload_response_success() {
        let body = br#"{"public_id": "profiles/abc123", "secure_url": "https://res.cloudinary.com/demo/image/upload/profiles/abc123"}"#;
        let parsed: UploadResponse = serde_json::from_slice(body).expect("should parse");
        assert_eq!(parsed.public_id.as_deref(), Some("profiles/abc123"));
        assert!(parsed.error.is_none());
    }

    #[test]
    fn test_destroy_response_outcomes() {
        let ok: DestroyResponse = serde_json::from_slice(br#"{"result": "ok"}"#).expect("parse");
        assert_eq!(ok.result.as_deref(), Some("ok"));

        let missing: DestroyResponse =
            serde_json::from_slice(br#"{"result": "not found"}"#).expect("parse");
        assert_eq!(missing.result.as_deref(), Some("not found"));
    }
}
