//! Tubely Core Library
//!
//! This crate provides the domain models, error types and configuration shared by
//! the Tubely storage, database and API crates.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Config, LogFormat, DEFAULT_MAX_UPLOAD_SIZE_MB};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::ThumbnailBackend;
