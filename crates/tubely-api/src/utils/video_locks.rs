//! Per-video serialization of thumbnail writes

use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

const DEFAULT_SHARD_COUNT: usize = 64;

/// Sharded async locks keyed by video id
///
/// An upload holds its video's shard from the record read through the store write,
/// the record update and the prune or cleanup that follows. Two uploads for the
/// same video never interleave; unrelated videos only contend when they land on
/// the same shard.
#[derive(Clone)]
pub struct VideoLocks {
    shards: Arc<Vec<Mutex<()>>>,
}

impl VideoLocks {
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARD_COUNT)
    }

    pub fn with_shards(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1)).map(|_| Mutex::new(())).collect();
        Self {
            shards: Arc::new(shards),
        }
    }

    fn shard_index(&self, video_id: Uuid) -> usize {
        (video_id.as_u128() % self.shards.len() as u128) as usize
    }

    /// Wait for exclusive access to `video_id`'s thumbnail.
    pub async fn lock(&self, video_id: Uuid) -> MutexGuard<'_, ()> {
        self.shards[self.shard_index(video_id)].lock().await
    }
}

impl Default for VideoLocks {
    fn default() -> Self {
        Self::new()
    }
}
