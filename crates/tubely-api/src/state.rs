//! Application state and sub-state extractors.
//!
//! Handlers take `State<Arc<AppState>>` and reach into the sub-state they need.

use crate::utils::video_locks::VideoLocks;
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_storage::ThumbnailStore;

/// Video metadata store.
#[derive(Clone)]
pub struct DbState {
    pub videos: Arc<dyn VideoRepository>,
}

/// Thumbnail storage plus the limits applied to incoming uploads.
#[derive(Clone)]
pub struct ThumbnailConfig {
    pub store: Arc<dyn ThumbnailStore>,
    /// Serializes uploads for the same video.
    pub locks: VideoLocks,
    pub max_file_size: usize,
    /// `None` accepts any declared media type.
    pub allowed_content_types: Option<Vec<String>>,
}

#[derive(Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub thumbnails: ThumbnailConfig,
    pub security: SecurityConfig,
    /// Error responses omit details when set.
    pub is_production: bool,
}

impl AppState {
    pub fn new(
        config: &Config,
        videos: Arc<dyn VideoRepository>,
        store: Arc<dyn ThumbnailStore>,
    ) -> Self {
        Self {
            db: DbState { videos },
            thumbnails: ThumbnailConfig {
                store,
                locks: VideoLocks::new(),
                max_file_size: config.max_upload_size_bytes(),
                allowed_content_types: config.allowed_content_types().map(<[String]>::to_vec),
            },
            security: SecurityConfig {
                jwt_secret: config.jwt_secret().to_string(),
            },
            is_production: config.is_production(),
        }
    }
}
