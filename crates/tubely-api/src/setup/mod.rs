//! Application setup and initialization
//!
//! Everything `main` needs to go from a `Config` to a served `Router`.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_storage::ThumbnailStore;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let videos = database::setup_video_repository(&config).await?;
    let store = storage::setup_storage(&config).await?;

    build_app(config, videos, store)
}

/// Assemble state and routes around already constructed stores.
pub fn build_app(
    config: Config,
    videos: Arc<dyn VideoRepository>,
    store: Arc<dyn ThumbnailStore>,
) -> Result<(Arc<AppState>, axum::Router)> {
    let state = Arc::new(AppState::new(&config, videos, store));
    let router = routes::setup_routes(&config, state.clone())?;
    Ok((state, router))
}
