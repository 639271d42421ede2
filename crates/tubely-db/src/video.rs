use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use tubely_core::{AppError, VideoRecord};
use uuid::Uuid;

/// Read/write access to video records.
#[async_trait]
pub trait VideoStore: Send + Sync {
    async fn create_video(&self, video: &VideoRecord) -> Result<(), AppError>;

    /// Fetch a record. Missing ids are `AppError::NotFound`.
    async fn get_video(&self, id: Uuid) -> Result<VideoRecord, AppError>;

    /// Overwrite the mutable fields of an existing record.
    async fn update_video(&self, video: &VideoRecord) -> Result<(), AppError>;
}

/// PostgreSQL-backed [`VideoStore`].
#[derive(Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoStore for VideoRepository {
    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "insert", db.record_id = %video.id))]
    async fn create_video(&self, video: &VideoRecord) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO videos (id, created_at, updated_at, title, description, thumbnail_url, video_url, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(video.id)
        .bind(video.created_at)
        .bind(video.updated_at)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(video.user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn get_video(&self, id: Uuid) -> Result<VideoRecord, AppError> {
        let video = sqlx::query_as::<Postgres, VideoRecord>(
            r#"
            SELECT id, created_at, updated_at, title, description, thumbnail_url, video_url, user_id
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        video.ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "update", db.record_id = %video.id))]
    async fn update_video(&self, video: &VideoRecord) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE videos
            SET title = $2, description = $3, thumbnail_url = $4, video_url = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(video.id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(video.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Couldn't find video".to_string()));
        }

        Ok(())
    }
}
