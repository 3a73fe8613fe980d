//! Core business logic for Opina.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. The persistence layer and HTTP surface plug in through the
//! traits exposed here.
//!
//! # Modules
//!
//! - `media` - Remote media asset lifecycle (upload, delete, URL resolution)
//! - `profile` - Avatar orchestration over the persistence seam

pub mod media;
pub mod profile;
