use crate::traits::{StorageResult, ThumbnailStore};
use crate::{Thumbnail, ThumbnailBackend};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process thumbnail storage keyed by video id
///
/// Cloning shares the same map. Thumbnails are served by the API at
/// `{public_base_url}/api/thumbnails/{video_id}` with the media type exactly
/// as declared on upload. No file name is derived, so any media type is kept.
#[derive(Clone)]
pub struct MemoryThumbnailStore {
    thumbnails: Arc<RwLock<HashMap<Uuid, Thumbnail>>>,
    public_base_url: String,
}

impl MemoryThumbnailStore {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            thumbnails: Arc::new(RwLock::new(HashMap::new())),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, video_id: Uuid) -> String {
        format!("{}/api/thumbnails/{}", self.public_base_url, video_id)
    }

    pub async fn len(&self) -> usize {
        self.thumbnails.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.thumbnails.read().await.is_empty()
    }
}

#[async_trait]
impl ThumbnailStore for MemoryThumbnailStore {
    async fn put(&self, video_id: Uuid, media_type: &str, data: Bytes) -> StorageResult<String> {
        let size = data.len();
        self.thumbnails
            .write()
            .await
            .insert(video_id, Thumbnail::new(data, media_type));

        tracing::info!(
            video_id = %video_id,
            media_type = %media_type,
            size_bytes = size,
            "Thumbnail stored in memory"
        );

        Ok(self.url_for(video_id))
    }

    async fn get(&self, video_id: Uuid) -> StorageResult<Option<Thumbnail>> {
        Ok(self.thumbnails.read().await.get(&video_id).cloned())
    }

    async fn delete(&self, video_id: Uuid, media_type: &str) -> StorageResult<()> {
        let mut thumbnails = self.thumbnails.write().await;
        if thumbnails
            .get(&video_id)
            .is_some_and(|t| t.media_type == media_type)
        {
            thumbnails.remove(&video_id);
            tracing::info!(video_id = %video_id, "Thumbnail removed from memory");
        }
        Ok(())
    }

    async fn prune(&self, _video_id: Uuid, _keep_media_type: &str) -> StorageResult<usize> {
        // One entry per video; a put already replaced any other media type.
        Ok(0)
    }

    fn backend_type(&self) -> ThumbnailBackend {
        ThumbnailBackend::Memory
    }
}
