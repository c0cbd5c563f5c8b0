//! Data models for the application
//!
//! Video records are owned by the metadata store; thumbnails are the blobs
//! attached to them.

mod thumbnail;
mod video;

pub use thumbnail::*;
pub use video::*;
