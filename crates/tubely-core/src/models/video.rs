use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A video owned by a user. Uploading attaches a published `video_url`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct VideoRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub user_id: Uuid,
}

impl VideoRecord {
    pub fn new(user_id: Uuid, title: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        VideoRecord {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            title: title.into(),
            description: description.into(),
            thumbnail_url: None,
            video_url: None,
            user_id,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Point the record at a newly published asset and bump `updated_at`.
    pub fn attach_video_url(&mut self, url: impl Into<String>) {
        self.video_url = Some(url.into());
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_no_video() {
        let owner = Uuid::new_v4();
        let record = VideoRecord::new(owner, "Boot.dev", "A video about Go");
        assert!(record.video_url.is_none());
        assert!(record.is_owned_by(owner));
        assert!(!record.is_owned_by(Uuid::new_v4()));
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_attach_video_url_bumps_updated_at() {
        let mut record = VideoRecord::new(Uuid::new_v4(), "t", "d");
        let before = record.updated_at;
        record.attach_video_url("https://bucket.s3.us-east-2.amazonaws.com/landscape/abc.mp4");
        assert_eq!(
            record.video_url.as_deref(),
            Some("https://bucket.s3.us-east-2.amazonaws.com/landscape/abc.mp4")
        );
        assert!(record.updated_at >= before);
        assert_eq!(record.created_at, before);
    }

    #[test]
    fn test_serializes_null_video_url() {
        let record = VideoRecord::new(Uuid::new_v4(), "t", "d");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json["video_url"].is_null());
        assert_eq!(json["title"], "t");
    }
}
