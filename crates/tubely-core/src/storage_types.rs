use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Thumbnail storage backend types
///
/// Defined in core because both configuration and the storage crate need it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailBackend {
    /// Files under a root directory, served from `/assets`.
    Filesystem,
    /// Process-local map keyed by video id, served from `/api/thumbnails/{id}`.
    Memory,
}

impl FromStr for ThumbnailBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "filesystem" | "fs" | "local" => Ok(ThumbnailBackend::Filesystem),
            "memory" | "in-memory" => Ok(ThumbnailBackend::Memory),
            _ => Err(anyhow::anyhow!("Invalid thumbnail backend: {}", s)),
        }
    }
}

impl Display for ThumbnailBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ThumbnailBackend::Filesystem => write!(f, "filesystem"),
            ThumbnailBackend::Memory => write!(f, "memory"),
        }
    }
}
