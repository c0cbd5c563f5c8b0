use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tubely_core::{
    models::{CreateVideoParams, Video},
    AppError,
};
use uuid::Uuid;

use super::video::VideoRepository;

/// Process-local video repository, used when `DATABASE_URL` is unset and in tests.
#[derive(Clone, Default)]
pub struct InMemoryVideoRepository {
    videos: Arc<RwLock<HashMap<Uuid, Video>>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully formed record, replacing any existing one with the same id.
    pub async fn insert(&self, video: Video) {
        self.videos.write().await.insert(video.id, video);
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    #[tracing::instrument(skip(self, params), fields(db.table = "videos", db.operation = "insert"))]
    async fn create_video(&self, params: CreateVideoParams) -> Result<Video, AppError> {
        let video = params.into_video();
        self.videos.write().await.insert(video.id, video.clone());
        Ok(video)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.videos.read().await.get(&id).cloned())
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "update", db.record_id = %video.id))]
    async fn update_video(&self, video: &Video) -> Result<Video, AppError> {
        let mut videos = self.videos.write().await;
        let stored = videos
            .get_mut(&video.id)
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

        stored.title = video.title.clone();
        stored.description = video.description.clone();
        stored.thumbnail_url = video.thumbnail_url.clone();
        stored.video_url = video.video_url.clone();
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(user_id: Uuid) -> CreateVideoParams {
        CreateVideoParams {
            user_id,
            title: "Boots".to_string(),
            description: "Boots in the snow".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let repo = InMemoryVideoRepository::new();
        let user_id = Uuid::new_v4();

        let created = repo.create_video(params(user_id)).await.unwrap();
        let fetched = repo.get_video(created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.user_id, user_id);
    }

    #[tokio::test]
    async fn test_get_unknown_returns_none() {
        let repo = InMemoryVideoRepository::new();
        assert!(repo.get_video(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_sets_thumbnail_and_bumps_updated_at() {
        let repo = InMemoryVideoRepository::new();
        let mut video = repo.create_video(params(Uuid::new_v4())).await.unwrap();

        video.thumbnail_url = Some(format!("/assets/{}.png", video.id));
        let updated = repo.update_video(&video).await.unwrap();

        assert_eq!(updated.thumbnail_url, video.thumbnail_url);
        assert!(updated.updated_at >= video.updated_at);
        assert_eq!(updated.created_at, video.created_at);

        let fetched = repo.get_video(video.id).await.unwrap().unwrap();
        assert_eq!(fetched.thumbnail_url, video.thumbnail_url);
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let repo = InMemoryVideoRepository::new();
        let video = params(Uuid::new_v4()).into_video();

        let err = repo.update_video(&video).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
