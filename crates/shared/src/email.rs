//! Email service for sending transactional emails.
//!
//! Uses `lettre` for SMTP transport. When SMTP credentials are missing the
//! service is constructed in a disabled state: a warning is logged once and
//! every send attempt fails fast without touching the network.

use std::time::Duration;

use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;
use tracing::warn;

use crate::config::EmailConfig;
use crate::error::AppError;

/// Transport-level timeout for SMTP connections. Keeps request handlers from
/// hanging when the relay does not respond.
const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Email service errors.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP credentials were missing at start-up; sending is disabled.
    #[error("SMTP transport not configured")]
    NotConfigured,
    /// Failed to build email message.
    #[error("Failed to build email: {0}")]
    BuildError(String),
    /// Failed to send email.
    #[error("Failed to send email: {0}")]
    SendError(String),
    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

impl From<EmailError> for AppError {
    fn from(err: EmailError) -> Self {
        Self::ExternalService(err.to_string())
    }
}

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl EmailService {
    /// Creates a new email service.
    ///
    /// Missing credentials degrade the service to a disabled no-op for the
    /// lifetime of the process instead of failing per-call or crashing.
    #[must_use]
    pub fn new(config: EmailConfig) -> Self {
        if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
            warn!("SMTP credentials not configured; email sending is disabled");
            return Self {
                config,
                transport: None,
            };
        }

        let transport = match Self::create_transport(&config) {
            Ok(transport) => Some(transport),
            Err(err) => {
                warn!(error = %err, "failed to build SMTP transport; email sending is disabled");
                None
            }
        };

        Self { config, transport }
    }

    /// Returns `true` when the service can attempt sends.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Creates an SMTP transport using STARTTLS.
    fn create_transport(
        config: &EmailConfig,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
        let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| EmailError::SendError(e.to_string()))?
            .port(config.smtp_port)
            .credentials(creds)
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        Ok(transport)
    }

    /// Sends an email verification email.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is disabled or the email cannot be sent.
    pub async fn send_verification_email(
        &self,
        to_email: &str,
        to_name: &str,
        token: &str,
    ) -> Result<(), EmailError> {
        let verification_url = format!("{}/verify-email?token={}", self.config.frontend_url, token);

        let subject = "Verify your email address - Opina";
        let body = format!(
            r"Hi {to_name},

Welcome to Opina! Please verify your email address by clicking the link below:

{verification_url}

This link will expire in 24 hours.

If you didn't create an account with Opina, you can safely ignore this email.

Best regards,
The Opina Team"
        );

        self.send_email(to_email, subject, &body).await
    }

    /// Sends a password reset email.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is disabled or the email cannot be sent.
    pub async fn send_password_reset_email(
        &self,
        to_email: &str,
        to_name: &str,
        token: &str,
    ) -> Result<(), EmailError> {
        let reset_url = format!("{}/reset-password?token={}", self.config.frontend_url, token);

        let subject = "Password reset request - Opina";
        let body = format!(
            r"Hi {to_name},

You requested to reset your password. Click the link below to choose a new one:

{reset_url}

This link will expire in 1 hour.

If you didn't request this, you can ignore this email and your password will
remain unchanged.

Best regards,
The Opina Team"
        );

        self.send_email(to_email, subject, &body).await
    }

    /// Sends a welcome email after account activation.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is disabled or the email cannot be sent.
    pub async fn send_welcome_email(&self, to_email: &str, to_name: &str) -> Result<(), EmailError> {
        let subject = "Welcome to Opina!";
        let body = format!(
            r"Hi {to_name},

Your account has been verified and activated. You can now enjoy everything
Opina has to offer.

If you have any questions, don't hesitate to contact our support team.

Thanks for joining us!
The Opina Team"
        );

        self.send_email(to_email, subject, &body).await
    }

    /// Sends a password changed notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is disabled or the email cannot be sent.
    pub async fn send_password_changed_email(
        &self,
        to_email: &str,
        to_name: &str,
    ) -> Result<(), EmailError> {
        let subject = "Password updated - Opina";
        let body = format!(
            r"Hi {to_name},

Your password has been updated successfully.

If you didn't make this change, please contact our support team immediately.

This is an automated email, please do not reply.
The Opina Team"
        );

        self.send_email(to_email, subject, &body).await
    }

    /// Sends a generic email.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is disabled or the email cannot be sent.
    pub async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), EmailError> {
        let Some(transport) = &self.transport else {
            return Err(EmailError::NotConfigured);
        };

        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| EmailError::BuildError(e.to_string()))?;

        transport
            .send(email)
            .await
            .map_err(|e| EmailError::SendError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "email_tests.rs"]
mod email_tests;
