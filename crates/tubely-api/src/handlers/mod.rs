//! HTTP handlers

pub mod thumbnail_get;
pub mod thumbnail_upload;
pub mod video_get;

use tubely_core::AppError;
use uuid::Uuid;

/// Parse a `{video_id}` path segment.
pub(crate) fn parse_video_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidInput("Invalid ID".to_string()))
}
