use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A video record. Thumbnail upload only ever changes `thumbnail_url` and `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Video {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Video {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Parameters for inserting a new video record.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateVideoParams {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
}

impl CreateVideoParams {
    /// Materialize a record with a fresh id and no media attached yet.
    pub fn into_video(self) -> Video {
        let now = Utc::now();
        Video {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            thumbnail_url: None,
            video_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}
