use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    response::IntoResponse,
    Json,
};
use tubely_core::{models::Video, AppError};

use crate::auth::models::UserContext;
use crate::constants::THUMBNAIL_FIELD;
use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::parse_video_id;
use crate::state::AppState;
use crate::utils::upload::{extract_multipart_file, parse_media_type, validate_content_type};

/// Upload thumbnail handler
///
/// Stores the `thumbnail` part of a multipart body for a video the caller owns and
/// points the video's `thumbnail_url` at it.
///
/// # Errors
/// - `AppError::InvalidInput` - Malformed video id
/// - `AppError::BadRequest` - Missing thumbnail part or media type not allowed
/// - `AppError::PayloadTooLarge` - Body exceeds the upload ceiling
/// - `AppError::InvalidMediaType` - Declared Content-Type cannot be parsed
/// - `AppError::NotFound` - No such video
/// - `AppError::Forbidden` - Caller does not own the video
/// - `AppError::Storage` / `AppError::Database` - Persisting the bytes or the record failed
#[utoipa::path(
    post,
    path = "/api/thumbnail_upload/{video_id}",
    tag = "thumbnails",
    params(
        ("video_id" = String, Path, description = "Video ID (UUID)")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Form with a single `thumbnail` file part"),
    responses(
        (status = 200, description = "Thumbnail stored; updated video returned", body = Video),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    skip(state, multipart),
    fields(
        user_id = %user.user_id,
        video_id = %video_id,
        operation = "upload_thumbnail"
    )
)]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Path(video_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;

    let multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "Request is not a multipart form");
        AppError::BadRequest("Unable to parse form file".to_string())
    })?;

    let thumbnails = &state.thumbnails;
    let file = extract_multipart_file(multipart, THUMBNAIL_FIELD, thumbnails.max_file_size).await?;

    let media_type = parse_media_type(file.content_type.as_deref())?;
    validate_content_type(&media_type, thumbnails.allowed_content_types.as_deref())?;
    // Stored and served back as declared; `media_type` is only the allowlist key.
    let declared_type = file.content_type.as_deref().unwrap_or_default().trim();

    // Held until the record and the stored bytes agree again.
    let _video_guard = thumbnails.locks.lock(video_id).await;

    let mut video = state
        .db
        .videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    if !video.is_owned_by(user.user_id) {
        return Err(AppError::Forbidden(
            "You don't have permission to upload the thumbnail".to_string(),
        )
        .into());
    }

    let size_bytes = file.data.len();
    let url = thumbnails
        .store
        .put(video_id, declared_type, file.data)
        .await?;

    let previous_url = video.thumbnail_url.replace(url.clone());

    let video = match state.db.videos.update_video(&video).await {
        Ok(video) => video,
        Err(e) => {
            // Bytes at a URL the record never pointed to would be orphaned.
            if previous_url.as_deref() != Some(url.as_str()) {
                if let Err(cleanup_err) = thumbnails.store.delete(video_id, declared_type).await {
                    tracing::warn!(
                        error = %cleanup_err,
                        video_id = %video_id,
                        media_type = %media_type,
                        "Failed to cleanup thumbnail after DB error"
                    );
                }
            }
            return Err(e.into());
        }
    };

    match thumbnails.store.prune(video_id, declared_type).await {
        Ok(0) => {}
        Ok(removed) => tracing::debug!(removed, "Removed thumbnails stored under other media types"),
        Err(e) => tracing::warn!(error = %e, "Failed to prune stale thumbnails"),
    }

    tracing::info!(
        media_type = %media_type,
        size_bytes,
        thumbnail_url = %url,
        "Thumbnail uploaded"
    );

    Ok(Json(video))
}
