//! Profile media orchestration.
//!
//! Composes the media lifecycle with avatar identifier persistence:
//! a profile update uploads the staged file and persists the returned
//! identifier; removal/replacement deletes the previously persisted
//! identifier best-effort. There is no distinct state machine; the state
//! is entirely the single persisted identifier field on the user record.

mod error;
mod service;

pub use error::ProfileError;
pub use service::{AvatarRepository, ProfileMediaService};
