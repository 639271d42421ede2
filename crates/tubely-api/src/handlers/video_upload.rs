use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use tubely_core::VideoRecord;

use crate::error::ErrorResponse;
use crate::services::upload::VideoUploadService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/video_upload/{video_id}",
    tag = "videos",
    params(
        ("video_id" = String, Path, description = "Id of a video record owned by the caller")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Form field `video` carrying an MP4 file"),
    responses(
        (status = 200, description = "Video published and recorded", body = VideoRecord),
        (status = 400, description = "Invalid id, content type, size or form", body = ErrorResponse),
        (status = 401, description = "Missing, invalid or mismatched identity", body = ErrorResponse),
        (status = 404, description = "Video record not found", body = ErrorResponse),
        (status = 500, description = "Probe, remux, publish or persistence failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    // A malformed body is only reported once the caller is authorized.
    let service = VideoUploadService::new(&state);
    match service.upload(&video_id, &headers, multipart).await {
        Ok(video) => Json(video).into_response(),
        Err(err) => err.render(state.security.is_production),
    }
}
