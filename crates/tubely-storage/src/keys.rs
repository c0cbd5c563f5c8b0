//! Shared naming rules for thumbnail files and URLs.

use crate::{StorageError, StorageResult};
use uuid::Uuid;

/// Derive the file extension from a media type: the lower-cased subtype, so
/// `image/PNG; charset=binary` maps to `png`.
pub fn extension_for(media_type: &str) -> StorageResult<String> {
    let essence = media_type.split(';').next().unwrap_or_default().trim();
    let ext = essence
        .split_once('/')
        .map(|(_, subtype)| subtype.to_ascii_lowercase())
        .unwrap_or_default();

    let valid = !ext.is_empty()
        && !ext.starts_with('.')
        && !ext.contains("..")
        && ext
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-' | '_'));

    if !valid {
        return Err(StorageError::InvalidKey(format!(
            "Media type '{}' does not yield a usable file extension",
            media_type
        )));
    }

    Ok(ext)
}

/// `{video_id}.{ext}`
pub fn thumbnail_filename(video_id: Uuid, ext: &str) -> String {
    format!("{}.{}", video_id, ext)
}

/// Media type served back for a file extension.
pub fn media_type_for_extension(ext: &str) -> String {
    match ext {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        "png" | "gif" | "webp" | "avif" | "bmp" | "tiff" | "svg+xml" => format!("image/{}", ext),
        _ => "application/octet-stream".to_string(),
    }
}
