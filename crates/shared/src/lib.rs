//! Shared configuration, errors, and collaborator services for Opina.
//!
//! This crate provides common pieces used across all other crates:
//! - Application-wide error types
//! - Configuration management (environment + config files)
//! - Transactional email service

pub mod config;
pub mod email;
pub mod error;

pub use config::{AppConfig, CloudinaryConfig, EmailConfig};
pub use email::{EmailError, EmailService};
pub use error::{AppError, AppResult};
