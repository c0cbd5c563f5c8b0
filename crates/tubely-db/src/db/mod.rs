//! Database repositories for data access layer
//!
//! `VideoRepository` is the seam handlers depend on. Both implementations keep the
//! same contract: `get_video` returns `Ok(None)` for an unknown id and
//! `update_video` returns `AppError::NotFound`.

pub mod memory;
pub mod video;

pub use memory::InMemoryVideoRepository;
pub use video::{PgVideoRepository, VideoRepository};
