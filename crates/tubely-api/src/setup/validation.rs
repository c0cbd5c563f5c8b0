//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use tubely_core::{Config, ThumbnailBackend};

/// Validate critical configuration values
///
/// Runs the config's own checks, then warns about settings that are legal but
/// probably unintended.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() && config.database_url().is_none() {
        tracing::warn!(
            "Production mode without DATABASE_URL - video records will not survive a restart"
        );
    }

    if config.thumbnail_backend() == ThumbnailBackend::Memory {
        tracing::warn!("Memory thumbnail backend - thumbnails will not survive a restart");
    }

    if config.allowed_content_types().is_none() {
        tracing::warn!(
            backend = %config.thumbnail_backend(),
            "No thumbnail content type allowlist - any declared media type is accepted"
        );
    }

    if config.max_upload_size_bytes() > 100 * 1024 * 1024 {
        tracing::warn!(
            max_upload_mb = config.max_upload_size_bytes() / 1024 / 1024,
            "Upload ceiling above 100 MB - whole bodies are buffered in memory"
        );
    }

    Ok(())
}
