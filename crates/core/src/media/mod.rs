//! Remote media asset lifecycle subsystem.
//!
//! Uploads locally staged files to a content-addressed-by-name location in a
//! remote image store, derives canonical public URLs for stored and default
//! assets, and deletes assets when superseded or removed, tolerating
//! partial failures throughout (upload succeeds but local cleanup fails;
//! asset never existed but deletion is requested anyway).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ MediaService                                                 │
//! │   upload_image(path, name)   delete_image(id)   resolve_url │
//! ├──────────────────────────────────────────────────────────────┤
//! │ resolver (pure, no I/O)      │ ImageStore (trait seam)       │
//! │   qualify / resolve_url      │   CloudinaryStore (reqwest)   │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod error;
mod options;
pub mod resolver;
mod service;
mod store;

pub use error::MediaError;
pub use options::{Transformation, UploadOptions, UploadReceipt};
pub use service::MediaService;
pub use store::{CloudinaryStore, ImageStore};
