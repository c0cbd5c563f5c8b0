//! Test fixtures: small image blobs and multipart forms.

use axum_test::multipart::{MultipartForm, Part};
use bytes::Bytes;

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// JPEG SOI/EOI markers around a tiny payload; enough for byte comparisons.
pub fn create_test_jpeg() -> Vec<u8> {
    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0];
    jpeg.extend_from_slice(b"tubely");
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

pub fn create_test_gif() -> Vec<u8> {
    b"GIF89a\x01\x00\x01\x00\x00\x00\x00;".to_vec()
}

/// Form with a single `thumbnail` file part.
pub fn thumbnail_form(data: Vec<u8>, media_type: &str) -> MultipartForm {
    let extension = media_type.rsplit('/').next().unwrap_or("bin");
    let part = Part::bytes(Bytes::from(data))
        .file_name(format!("thumbnail.{}", extension))
        .mime_type(media_type);
    MultipartForm::new().add_part("thumbnail", part)
}

pub const RAW_FORM_BOUNDARY: &str = "tubely-test-boundary";

/// Request Content-Type for bodies built by [`raw_thumbnail_body`].
pub fn raw_form_content_type() -> String {
    format!("multipart/form-data; boundary={}", RAW_FORM_BOUNDARY)
}

/// Hand-built multipart body with one `thumbnail` part whose Content-Type
/// header is written verbatim, or left out entirely when `None`.
pub fn raw_thumbnail_body(content_type: Option<&str>, data: &[u8]) -> Bytes {
    let mut body = format!(
        "--{}\r\nContent-Disposition: form-data; name=\"thumbnail\"; filename=\"thumbnail.bin\"\r\n",
        RAW_FORM_BOUNDARY
    );
    if let Some(content_type) = content_type {
        body.push_str(&format!("Content-Type: {}\r\n", content_type));
    }
    body.push_str("\r\n");

    let mut bytes = body.into_bytes();
    bytes.extend_from_slice(data);
    bytes.extend_from_slice(format!("\r\n--{}--\r\n", RAW_FORM_BOUNDARY).as_bytes());
    Bytes::from(bytes)
}
