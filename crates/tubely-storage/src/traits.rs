//! Thumbnail storage abstraction trait

use crate::{Thumbnail, ThumbnailBackend};
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use uuid::Uuid;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Thumbnail storage abstraction
///
/// Every backend keeps at most one live thumbnail per video id. `put` overwrites
/// whatever was stored under the same id and media type.
#[async_trait]
pub trait ThumbnailStore: Send + Sync {
    /// Store the bytes and return the URL clients should use to fetch them.
    async fn put(&self, video_id: Uuid, media_type: &str, data: Bytes) -> StorageResult<String>;

    /// Fetch the current thumbnail for a video, if any.
    async fn get(&self, video_id: Uuid) -> StorageResult<Option<Thumbnail>>;

    /// Remove the thumbnail stored for `video_id` under `media_type`.
    ///
    /// Deleting something that does not exist is not an error.
    async fn delete(&self, video_id: Uuid, media_type: &str) -> StorageResult<()>;

    /// Remove thumbnails for `video_id` stored under any media type other than
    /// `keep_media_type`. Returns how many were removed.
    async fn prune(&self, video_id: Uuid, keep_media_type: &str) -> StorageResult<usize>;

    /// Get the storage backend type
    fn backend_type(&self) -> ThumbnailBackend;
}
