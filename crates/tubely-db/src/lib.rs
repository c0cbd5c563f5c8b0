//! Tubely Database Library
//!
//! Video metadata repositories: a PostgreSQL implementation and an in-process one
//! used when no database is configured.

pub mod db;

pub use db::{InMemoryVideoRepository, PgVideoRepository, VideoRepository};
