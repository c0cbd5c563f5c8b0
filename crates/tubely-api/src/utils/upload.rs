//! Common utilities for file upload handlers

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::Bytes;
use tubely_core::AppError;

/// A single file part pulled out of a multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub data: Bytes,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

fn multipart_error(err: MultipartError, max_size: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(format!(
            "File size exceeds maximum allowed size of {} MB",
            max_size / 1024 / 1024
        ));
    }
    tracing::debug!(error = %err, "Failed to read multipart body");
    AppError::BadRequest("Unable to parse form file".to_string())
}

/// Extract the file sent under `field_name`.
///
/// Other fields are skipped. Sending the field twice is rejected so the stored
/// bytes are never ambiguous.
pub async fn extract_multipart_file(
    mut multipart: Multipart,
    field_name: &str,
    max_size: usize,
) -> Result<UploadedFile, AppError> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_size))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        if file.is_some() {
            return Err(AppError::BadRequest(format!(
                "Multiple '{}' fields are not allowed; send exactly one",
                field_name
            )));
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, max_size))?;

        file = Some(UploadedFile {
            data,
            file_name,
            content_type,
        });
    }

    let file =
        file.ok_or_else(|| AppError::BadRequest("Unable to parse form file".to_string()))?;

    validate_file_size(file.data.len(), max_size)?;

    Ok(file)
}

/// Validate file size
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size exceeds maximum allowed size of {} MB",
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}

/// RFC 2045 token: printable ASCII except space and tspecials.
fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| {
            c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?=".contains(c)
        })
}

/// Parse a declared Content-Type into its lower-cased `type/subtype`.
///
/// Parameters are checked for shape and then dropped
/// (`image/JPEG; charset=utf-8` becomes `image/jpeg`).
pub fn parse_media_type(content_type: Option<&str>) -> Result<String, AppError> {
    let raw = content_type.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(AppError::InvalidMediaType("no media type".to_string()));
    }

    let mut parts = raw.split(';');
    let essence = parts.next().unwrap_or_default().trim();

    let (kind, subtype) = essence
        .split_once('/')
        .ok_or_else(|| AppError::InvalidMediaType(format!("expected slash in '{}'", essence)))?;
    if !is_token(kind) || !is_token(subtype) {
        return Err(AppError::InvalidMediaType(format!(
            "invalid media type '{}'",
            essence
        )));
    }

    for param in parts.map(str::trim).filter(|p| !p.is_empty()) {
        let valid = param
            .split_once('=')
            .is_some_and(|(key, value)| is_token(key.trim()) && !value.trim().is_empty());
        if !valid {
            return Err(AppError::InvalidMediaType(format!(
                "invalid media parameter '{}'",
                param
            )));
        }
    }

    Ok(essence.to_lowercase())
}

/// Validate a parsed media type against an allowlist; `None` accepts anything.
pub fn validate_content_type(
    media_type: &str,
    allowed_types: Option<&[String]>,
) -> Result<(), AppError> {
    let Some(allowed_types) = allowed_types else {
        return Ok(());
    };

    if !allowed_types.iter().any(|ct| media_type == ct.to_lowercase()) {
        return Err(AppError::BadRequest(format!(
            "Unsupported thumbnail type '{}'. Allowed types: {}",
            media_type,
            allowed_types.join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        vec!["image/jpeg".to_string(), "image/png".to_string()]
    }

    #[test]
    fn test_parse_media_type_strips_parameters_and_lowercases() {
        assert_eq!(parse_media_type(Some("image/png")).unwrap(), "image/png");
        assert_eq!(
            parse_media_type(Some("Image/JPEG; charset=utf-8")).unwrap(),
            "image/jpeg"
        );
        assert_eq!(
            parse_media_type(Some(" image/svg+xml ")).unwrap(),
            "image/svg+xml"
        );
    }

    #[test]
    fn test_parse_media_type_rejects_missing_and_malformed() {
        for bad in [None, Some(""), Some("image"), Some("image/"), Some("/png"), Some("im age/png"), Some("image/png; charset")] {
            let err = parse_media_type(bad).unwrap_err();
            assert!(
                matches!(err, AppError::InvalidMediaType(_)),
                "expected parse failure for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_validate_content_type_allowlist() {
        let allowed = allowed();
        assert!(validate_content_type("image/png", Some(&allowed)).is_ok());
        assert!(validate_content_type("image/jpeg", Some(&allowed)).is_ok());

        let err = validate_content_type("image/gif", Some(&allowed)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_validate_content_type_without_allowlist_accepts_anything() {
        assert!(validate_content_type("application/pdf", None).is_ok());
    }

    #[test]
    fn test_validate_file_size() {
        assert!(validate_file_size(10, 10).is_ok());
        assert!(matches!(
            validate_file_size(11, 10),
            Err(AppError::PayloadTooLarge(_))
        ));
    }
}
