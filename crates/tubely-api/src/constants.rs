//! API constants

/// API base path prefix
pub const API_BASE: &str = "/api";

/// Path the filesystem thumbnail root is served from
pub use tubely_storage::factory::ASSETS_URL_PREFIX as ASSETS_PATH;

/// Multipart field carrying the thumbnail bytes
pub const THUMBNAIL_FIELD: &str = "thumbnail";
