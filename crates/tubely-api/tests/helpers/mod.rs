//! Test helpers: build the router over in-process stores.
//!
//! Run from workspace root: `cargo test -p tubely-api`. Video records live in an
//! `InMemoryVideoRepository` and filesystem thumbnails in a temp directory, so no
//! external services are needed.

#![allow(dead_code)]

pub mod auth;
pub mod fixtures;

use axum_test::TestServer;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tubely_api::setup::build_app;
use tubely_core::models::{CreateVideoParams, Video};
use tubely_core::Config;
use tubely_db::{InMemoryVideoRepository, VideoRepository};
use tubely_storage::create_thumbnail_store;
use uuid::Uuid;

pub use auth::TEST_JWT_SECRET;

pub const TEST_PUBLIC_BASE_URL: &str = "http://tubely.test";

/// Test application: server plus handles on the stores behind it.
pub struct TestApp {
    pub server: TestServer,
    pub videos: InMemoryVideoRepository,
    pub assets: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn assets_path(&self) -> &Path {
        self.assets.path()
    }

    /// Seed a video owned by `user_id`.
    pub async fn create_video(&self, user_id: Uuid) -> Video {
        self.videos
            .create_video(CreateVideoParams {
                user_id,
                title: "Boots".to_string(),
                description: "A video about boots".to_string(),
            })
            .await
            .expect("Failed to create test video")
    }

    pub async fn stored_video(&self, id: Uuid) -> Video {
        self.videos
            .get_video(id)
            .await
            .expect("Failed to read test video")
            .expect("Test video missing")
    }

    /// File names currently in the assets directory, sorted.
    pub fn asset_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.assets.path())
            .expect("Failed to read assets directory")
            .map(|entry| {
                entry
                    .expect("Failed to read directory entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
}

pub fn create_test_config(backend: &str, assets_root: &Path, extra: &[(&str, &str)]) -> Config {
    let assets_root = assets_root.to_string_lossy().into_owned();
    let mut vars: Vec<(String, String)> = vec![
        ("JWT_SECRET".into(), TEST_JWT_SECRET.into()),
        ("ENVIRONMENT".into(), "test".into()),
        ("THUMBNAIL_BACKEND".into(), backend.into()),
        ("ASSETS_ROOT".into(), assets_root),
        ("PUBLIC_BASE_URL".into(), TEST_PUBLIC_BASE_URL.into()),
    ];
    for (key, value) in extra {
        vars.retain(|(k, _)| k != key);
        vars.push((key.to_string(), value.to_string()));
    }

    Config::from_vars(|key| {
        vars.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .expect("Failed to build test config")
}

/// Setup test app on the filesystem backend.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with("filesystem", &[], None).await
}

/// Setup test app on the in-memory backend.
pub async fn setup_memory_test_app() -> TestApp {
    setup_test_app_with("memory", &[], None).await
}

/// Setup test app with extra config and, optionally, a repository standing in
/// front of the seeded in-memory one.
pub async fn setup_test_app_with(
    backend: &str,
    extra: &[(&str, &str)],
    wrap: Option<fn(InMemoryVideoRepository) -> Arc<dyn VideoRepository>>,
) -> TestApp {
    let assets = tempfile::tempdir().expect("Failed to create temp directory");
    let config = create_test_config(backend, assets.path(), extra);

    let videos = InMemoryVideoRepository::new();
    let repository: Arc<dyn VideoRepository> = match wrap {
        Some(wrap) => wrap(videos.clone()),
        None => Arc::new(videos.clone()),
    };

    let store = create_thumbnail_store(&config)
        .await
        .expect("Failed to create thumbnail store");

    let (_state, app) = build_app(config, repository, store).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        videos,
        assets,
    }
}
