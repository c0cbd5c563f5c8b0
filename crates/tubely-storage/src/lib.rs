//! Tubely Storage Library
//!
//! Thumbnail storage abstraction and its two backends: a filesystem root whose
//! files are served under `/assets`, and a process-local map served by the API.
//!
//! # File naming
//!
//! A thumbnail for video `{id}` uploaded as `type/{subtype}` is stored as
//! `{id}.{subtype}`. At most one thumbnail per video is kept; uploading under a
//! different subtype leaves the old file until it is pruned.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_thumbnail_store;
#[cfg(feature = "storage-local")]
pub use local::FilesystemThumbnailStore;
pub use memory::MemoryThumbnailStore;
pub use traits::{StorageError, StorageResult, ThumbnailStore};
pub use tubely_core::models::Thumbnail;
pub use tubely_core::ThumbnailBackend;
