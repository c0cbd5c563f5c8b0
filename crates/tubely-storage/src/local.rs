use crate::keys::{extension_for, media_type_for_extension, thumbnail_filename};
use crate::traits::{StorageError, StorageResult, ThumbnailStore};
use crate::{Thumbnail, ThumbnailBackend};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Filesystem thumbnail storage
///
/// Thumbnails live directly under `base_path` as `{video_id}.{ext}` and are
/// published under `{url_prefix}/{video_id}.{ext}`.
#[derive(Clone)]
pub struct FilesystemThumbnailStore {
    base_path: PathBuf,
    url_prefix: String,
}

impl FilesystemThumbnailStore {
    /// Create a new store rooted at `base_path`
    ///
    /// # Arguments
    /// * `base_path` - Directory holding the thumbnails (e.g., "./assets")
    /// * `url_prefix` - Path the directory is served from (e.g., "/assets")
    pub async fn new(base_path: impl Into<PathBuf>, url_prefix: impl Into<String>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create assets directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(FilesystemThumbnailStore {
            base_path,
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve a file name under the root, refusing anything that could escape it.
    fn file_path(&self, filename: &str) -> StorageResult<PathBuf> {
        if filename.contains("..")
            || filename.starts_with('/')
            || filename.contains('/')
            || filename.contains('\\')
        {
            return Err(StorageError::InvalidKey(
                "Thumbnail file name contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(filename))
    }

    fn url_for(&self, filename: &str) -> String {
        format!("{}/{}", self.url_prefix, filename)
    }

    /// Every `(extension, path)` currently stored for a video.
    async fn stored_variants(&self, video_id: Uuid) -> StorageResult<Vec<(String, PathBuf)>> {
        let prefix = format!("{}.", video_id);
        let mut found = Vec::new();

        let mut entries = fs::read_dir(&self.base_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(ext) = name.strip_prefix(&prefix) {
                if !ext.is_empty() && entry.file_type().await?.is_file() {
                    found.push((ext.to_string(), entry.path()));
                }
            }
        }

        Ok(found)
    }
}

#[async_trait]
impl ThumbnailStore for FilesystemThumbnailStore {
    async fn put(&self, video_id: Uuid, media_type: &str, data: Bytes) -> StorageResult<String> {
        let ext = extension_for(media_type)?;
        let filename = thumbnail_filename(video_id, &ext);
        let path = self.file_path(&filename)?;
        let size = data.len();

        // Hidden sibling so a concurrent reader never matches a half-written file.
        let tmp_path = self.file_path(&format!(".{}.{}.tmp", filename, Uuid::new_v4()))?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&tmp_path).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to create file {}: {}",
                tmp_path.display(),
                e
            ))
        })?;

        let written = async {
            file.write_all(&data).await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StorageError::UploadFailed(format!(
                "Failed to write file {}: {}",
                tmp_path.display(),
                e
            )));
        }
        drop(file);

        if let Err(e) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StorageError::UploadFailed(format!(
                "Failed to move thumbnail into place at {}: {}",
                path.display(),
                e
            )));
        }

        tracing::info!(
            path = %path.display(),
            video_id = %video_id,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Thumbnail written to filesystem"
        );

        Ok(self.url_for(&filename))
    }

    async fn get(&self, video_id: Uuid) -> StorageResult<Option<Thumbnail>> {
        let mut newest: Option<(SystemTime, String, PathBuf)> = None;
        for (ext, path) in self.stored_variants(video_id).await? {
            let modified = fs::metadata(&path)
                .await?
                .modified()
                .unwrap_or(SystemTime::UNIX_EPOCH);
            if newest.as_ref().map_or(true, |(t, _, _)| modified >= *t) {
                newest = Some((modified, ext, path));
            }
        }

        let Some((_, ext, path)) = newest else {
            return Ok(None);
        };

        let data = match fs::read(&path).await {
            Ok(data) => data,
            // Pruned between the directory scan and the read
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::DownloadFailed(format!(
                    "Failed to read file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        Ok(Some(Thumbnail::new(data, media_type_for_extension(&ext))))
    }

    async fn delete(&self, video_id: Uuid, media_type: &str) -> StorageResult<()> {
        let ext = extension_for(media_type)?;
        let path = self.file_path(&thumbnail_filename(video_id, &ext))?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(
                    path = %path.display(),
                    video_id = %video_id,
                    "Thumbnail deleted from filesystem"
                );
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn prune(&self, video_id: Uuid, keep_media_type: &str) -> StorageResult<usize> {
        let keep = extension_for(keep_media_type)?;
        let mut removed = 0;

        for (ext, path) in self.stored_variants(video_id).await? {
            if ext == keep {
                continue;
            }
            match fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(StorageError::DeleteFailed(format!(
                        "Failed to delete file {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        }

        if removed > 0 {
            tracing::debug!(video_id = %video_id, removed, "Pruned stale thumbnails");
        }

        Ok(removed)
    }

    fn backend_type(&self) -> ThumbnailBackend {
        ThumbnailBackend::Filesystem
    }
}
