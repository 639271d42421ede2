//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`; domain errors from the storage,
//! processing and identity layers convert into it so every failure renders
//! with the same status, body and logging.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tubely_core::{AppError, ErrorMetadata, LogLevel};
use tubely_processing::PipelineError;
use tubely_storage::StorageError;
use utoipa::ToSchema;

use crate::auth::AuthError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// HTTP-side wrapper around [`AppError`] so domain errors from the other
/// crates can convert into one type (orphan rules).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

impl HttpAppError {
    fn body(&self, is_production: bool) -> ErrorResponse {
        let app_error = &self.0;
        let show_details = !is_production && !app_error.is_sensitive();
        ErrorResponse {
            error: app_error.client_message(),
            details: show_details.then(|| app_error.detailed_message()),
            error_type: show_details.then(|| app_error.error_type().to_string()),
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
            suggested_action: app_error.suggested_action().map(String::from),
        }
    }

    /// Log the error and render it. `is_production` comes from the app's
    /// `Config`, never from the process environment.
    pub fn render(self, is_production: bool) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(&self.0);

        (status, Json(self.body(is_production))).into_response()
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::UploadFailed(msg) => AppError::S3(msg),
            // Keys are generated server-side, so a bad one is our fault.
            StorageError::InvalidKey(msg) => AppError::Internal(format!("Invalid storage key: {}", msg)),
            StorageError::IoError(err) => AppError::Internal(format!("IO error: {}", err)),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}

impl From<PipelineError> for HttpAppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Probe(e) => HttpAppError(AppError::MediaConversionError(e.to_string())),
            PipelineError::Remux(e) => HttpAppError(AppError::MediaConversionError(e.to_string())),
            PipelineError::ReadOutput(e) => {
                HttpAppError(AppError::Internal(format!("Failed to read remuxed file: {}", e)))
            }
            PipelineError::Publish(e) => HttpAppError::from(e),
        }
    }
}

impl From<AuthError> for HttpAppError {
    fn from(err: AuthError) -> Self {
        HttpAppError(AppError::Unauthorized(err.to_string()))
    }
}
