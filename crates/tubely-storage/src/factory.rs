#[cfg(feature = "storage-local")]
use crate::FilesystemThumbnailStore;
#[cfg(not(feature = "storage-local"))]
use crate::StorageError;
use crate::{MemoryThumbnailStore, StorageResult, ThumbnailBackend, ThumbnailStore};
use std::sync::Arc;
use tubely_core::Config;

/// URL path the filesystem root is served from.
pub const ASSETS_URL_PREFIX: &str = "/assets";

/// Create a thumbnail store based on configuration
pub async fn create_thumbnail_store(config: &Config) -> StorageResult<Arc<dyn ThumbnailStore>> {
    match config.thumbnail_backend() {
        #[cfg(feature = "storage-local")]
        ThumbnailBackend::Filesystem => {
            let store =
                FilesystemThumbnailStore::new(config.assets_root(), ASSETS_URL_PREFIX).await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "storage-local"))]
        ThumbnailBackend::Filesystem => Err(StorageError::ConfigError(
            "Filesystem thumbnail backend not available (storage-local feature not enabled)"
                .to_string(),
        )),

        ThumbnailBackend::Memory => Ok(Arc::new(MemoryThumbnailStore::new(
            config.public_base_url(),
        ))),
    }
}
