//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Remote image store configuration.
    pub cloudinary: CloudinaryConfig,
    /// Transactional email configuration.
    #[serde(default)]
    pub email: EmailConfig,
}

/// Remote image store (Cloudinary-compatible API) configuration.
///
/// Read once at process start; services hold an immutable copy for the
/// lifetime of the process.
#[derive(Debug, Clone, Deserialize)]
pub struct CloudinaryConfig {
    /// Cloud account name, part of every API endpoint.
    pub cloud_name: String,
    /// API key sent with every signed request.
    pub api_key: String,
    /// API secret used to sign requests. Never sent over the wire.
    pub api_secret: String,
    /// Folder that bare asset identifiers are implicitly qualified with.
    #[serde(default = "default_folder")]
    pub folder: String,
    /// Public delivery base URL, including trailing slash.
    pub base_url: String,
    /// Identifier of the default avatar asset. May arrive as an unexpanded
    /// `${...}` template when the environment loader does not perform nested
    /// variable expansion.
    #[serde(default = "default_avatar_path")]
    pub default_avatar_path: String,
    /// Discrete default avatar filename, used to reconstruct the identifier
    /// when `default_avatar_path` was left unexpanded.
    #[serde(default)]
    pub default_avatar_filename: Option<String>,
    /// Accept invalid TLS certificates on store requests. Scoped to the
    /// store client only; opt-in per environment, never default-on.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

fn default_folder() -> String {
    "profiles".to_string()
}

fn default_avatar_path() -> String {
    "profiles/default-avatar.png".to_string()
}

/// Transactional email (SMTP) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// SMTP relay port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username. Empty means email sending is disabled.
    #[serde(default)]
    pub smtp_username: String,
    /// SMTP password. Empty means email sending is disabled.
    #[serde(default)]
    pub smtp_password: String,
    /// Sender address.
    #[serde(default = "default_from_email")]
    pub from_email: String,
    /// Sender display name.
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Frontend base URL used in email links.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    1025
}

fn default_from_email() -> String {
    "noreply@opina.dev".to_string()
}

fn default_from_name() -> String {
    "Opina".to_string()
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            frontend_url: default_frontend_url(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("OPINA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_config_defaults() {
        let config = EmailConfig::default();
        assert_eq!(config.smtp_host, "localhost");
        assert_eq!(config.smtp_port, 1025);
        assert!(config.smtp_username.is_empty());
        assert_eq!(config.frontend_url, "http://localhost:3000");
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("OPINA__CLOUDINARY__CLOUD_NAME", Some("demo")),
                ("OPINA__CLOUDINARY__API_KEY", Some("key123")),
                ("OPINA__CLOUDINARY__API_SECRET", Some("secret123")),
                (
                    "OPINA__CLOUDINARY__BASE_URL",
                    Some("https://res.cloudinary.com/demo/image/upload/"),
                ),
            ],
            || {
                let config = AppConfig::load().expect("should load from environment");
                assert_eq!(config.cloudinary.cloud_name, "demo");
                assert_eq!(config.cloudinary.folder, "profiles");
                assert_eq!(
                    config.cloudinary.default_avatar_path,
                    "profiles/default-avatar.png"
                );
                assert!(!config.cloudinary.accept_invalid_certs);
                assert_eq!(config.email.smtp_host, "localhost");
            },
        );
    }

    #[test]
    fn test_environment_overrides_defaults() {
        temp_env::with_vars(
            [
                ("OPINA__CLOUDINARY__CLOUD_NAME", Some("demo")),
                ("OPINA__CLOUDINARY__API_KEY", Some("key123")),
                ("OPINA__CLOUDINARY__API_SECRET", Some("secret123")),
                (
                    "OPINA__CLOUDINARY__BASE_URL",
                    Some("https://res.cloudinary.com/demo/image/upload/"),
                ),
                ("OPINA__CLOUDINARY__FOLDER", Some("avatars")),
                (
                    "OPINA__CLOUDINARY__DEFAULT_AVATAR_FILENAME",
                    Some("default.png"),
                ),
                ("OPINA__EMAIL__SMTP_HOST", Some("smtp.example.com")),
                ("OPINA__EMAIL__SMTP_PORT", Some("587")),
            ],
            || {
                let config = AppConfig::load().expect("should load from environment");
                assert_eq!(config.cloudinary.folder, "avatars");
                assert_eq!(
                    config.cloudinary.default_avatar_filename.as_deref(),
                    Some("default.png")
                );
                assert_eq!(config.email.smtp_host, "smtp.example.com");
                assert_eq!(config.email.smtp_port, 587);
            },
        );
    }
}
