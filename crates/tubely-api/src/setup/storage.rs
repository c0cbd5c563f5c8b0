//! Thumbnail storage setup and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_storage::{create_thumbnail_store, ThumbnailStore};

/// Build the thumbnail store selected by `THUMBNAIL_BACKEND`.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn ThumbnailStore>> {
    tracing::info!("Initializing thumbnail storage...");
    let store = create_thumbnail_store(config)
        .await
        .context("Failed to initialize thumbnail storage")?;

    tracing::info!(
        backend = %store.backend_type(),
        assets_root = %config.assets_root(),
        "Thumbnail storage initialized successfully"
    );

    Ok(store)
}
