//! Minimal Google Drive v3 facade.
//!
//! Three independent remote operations — create file, set permission, list
//! files — each a single HTTP call issued against a resolved identity.

pub mod client;
pub mod constants;
pub mod error;
pub mod models;

pub use client::DriveClient;
pub use error::RemoteError;
pub use models::{DriveFile, FileListing, PermissionRequest, PermissionTarget};
