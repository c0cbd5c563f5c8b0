use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use tubely_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::parse_video_id;
use crate::state::AppState;

/// Serve the stored thumbnail bytes with the media type they were uploaded as.
#[utoipa::path(
    get,
    path = "/api/thumbnails/{video_id}",
    tag = "thumbnails",
    params(
        ("video_id" = String, Path, description = "Video ID (UUID)")
    ),
    responses(
        (status = 200, description = "Thumbnail bytes", content_type = "application/octet-stream"),
        (status = 400, description = "Invalid video ID", body = ErrorResponse),
        (status = 404, description = "Thumbnail not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(video_id = %video_id, operation = "get_thumbnail"))]
pub async fn get_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;

    let thumbnail = state
        .thumbnails
        .store
        .get(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Thumbnail not found".to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, thumbnail.media_type),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        thumbnail.data,
    ))
}
