//! Video upload service
//!
//! Runs one upload request through
//! authorize → buffer → probe → remux → classify → publish → record.
//! Each step is terminal on failure. No bytes are read before the caller is
//! authorized, and every local file is removed by the time the request ends.

use std::sync::Arc;

use axum::extract::{multipart::MultipartRejection, Multipart};
use axum::http::HeaderMap;
use tempfile::NamedTempFile;
use tubely_core::constants::VIDEO_FORM_FIELD;
use tubely_core::{AppError, VideoRecord};
use tubely_processing::UploadStage;
use uuid::Uuid;

use crate::auth::{extract_bearer_token, validate_jwt};
use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::{stream_field_to_temp_file, validate_content_type};

/// An upload buffered to local disk. The file is deleted on drop.
#[derive(Debug)]
pub struct BufferedUpload {
    pub file: NamedTempFile,
    pub content_type: String,
    pub size_bytes: u64,
}

pub struct VideoUploadService {
    state: Arc<AppState>,
}

impl VideoUploadService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Full upload workflow. Returns the updated record.
    pub async fn upload(
        &self,
        raw_video_id: &str,
        headers: &HeaderMap,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<VideoRecord, HttpAppError> {
        tracing::debug!(stage = %UploadStage::Received, video_id = %raw_video_id, "Upload received");

        let (mut video, user_id) = self.authorize(raw_video_id, headers).await?;
        tracing::info!(
            stage = %UploadStage::Authorized,
            video_id = %video.id,
            user_id = %user_id,
            "Uploading video"
        );

        let upload = self.buffer(multipart).await?;
        tracing::debug!(
            stage = %UploadStage::Buffered,
            video_id = %video.id,
            size_bytes = upload.size_bytes,
            "Buffered upload to temp file"
        );

        let asset = self
            .state
            .pipeline
            .publish(upload.file.path(), &upload.content_type)
            .await
            .map_err(|e| {
                tracing::warn!(
                    stage = %e.failed_stage(),
                    video_id = %video.id,
                    error = %e,
                    "Upload pipeline failed"
                );
                HttpAppError::from(e)
            })?;
        drop(upload);

        video.attach_video_url(asset.url.clone());
        if let Err(e) = self.state.videos.update_video(&video).await {
            // The object is already public; nothing rolls it back.
            tracing::error!(
                stage = %UploadStage::Recorded,
                video_id = %video.id,
                storage_key = %asset.storage_key,
                url = %asset.url,
                error = %e,
                "Published video but failed to record its URL"
            );
            return Err(e.into());
        }

        tracing::info!(
            stage = %UploadStage::Done,
            video_id = %video.id,
            user_id = %user_id,
            storage_key = %asset.storage_key,
            orientation = %asset.orientation,
            size_bytes = asset.size_bytes,
            "Video upload complete"
        );

        Ok(video)
    }

    /// Resolve the target record and check the caller owns it.
    async fn authorize(
        &self,
        raw_video_id: &str,
        headers: &HeaderMap,
    ) -> Result<(VideoRecord, Uuid), HttpAppError> {
        let video_id = Uuid::parse_str(raw_video_id)
            .map_err(|_| AppError::BadRequest("Invalid ID".to_string()))?;

        let token = extract_bearer_token(headers)?;
        let user_id = validate_jwt(token, &self.state.security.jwt_secret)?;

        let video = self.state.videos.get_video(video_id).await?;
        if !video.is_owned_by(user_id) {
            return Err(AppError::Unauthorized(format!(
                "user {} does not own video {}",
                user_id, video_id
            ))
            .into());
        }

        Ok((video, user_id))
    }

    /// Find the `video` field, check its media type and stream it to a temp file.
    async fn buffer(
        &self,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<BufferedUpload, HttpAppError> {
        let limits = &self.state.upload;
        let mut multipart = multipart.map_err(|rejection| {
            AppError::InvalidInput(format!("Invalid multipart request: {}", rejection.body_text()))
        })?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
        {
            if field.name() != Some(VIDEO_FORM_FIELD) {
                continue;
            }

            let content_type =
                validate_content_type(field.content_type(), &limits.allowed_content_type)?;
            let (file, size_bytes) =
                stream_field_to_temp_file(field, &limits.temp_dir, limits.max_video_size_bytes)
                    .await?;

            return Ok(BufferedUpload {
                file,
                content_type,
                size_bytes,
            });
        }

        Err(AppError::InvalidInput(format!(
            "No file provided in form field '{}'",
            VIDEO_FORM_FIELD
        ))
        .into())
    }
}
