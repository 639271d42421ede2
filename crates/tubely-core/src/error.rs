//! Request-level failures.
//!
//! Every failure an upload can hit ends up as an [`AppError`]; [`ErrorMetadata`]
//! says how each variant is rendered over HTTP and at which level it is logged.
//! `Database` wraps `sqlx::Error` only when the `sqlx` feature is enabled.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Client mistakes.
    Debug,
    /// Rejected credentials.
    Warn,
    /// Dependency and server failures.
    Error,
}

/// Presentation of an error to HTTP clients and logs.
pub trait ErrorMetadata {
    fn http_status_code(&self) -> u16;

    /// Stable machine-readable code, e.g. `"STORAGE_ERROR"`.
    fn error_code(&self) -> &'static str;

    /// Whether retrying the same request may succeed.
    fn is_recoverable(&self) -> bool;

    fn suggested_action(&self) -> Option<&'static str>;

    /// Message safe to show the client. Dependency details never appear here.
    fn client_message(&self) -> String;

    /// Hide `details` from the response body even outside production.
    fn is_sensitive(&self) -> bool;

    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("S3 error: {0}")]
    S3(String),

    #[error("Media conversion error: {0}")]
    MediaConversionError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// How a variant is presented and logged.
struct Presentation {
    status: u16,
    code: &'static str,
    recoverable: bool,
    action: Option<&'static str>,
    sensitive: bool,
    level: LogLevel,
}

const RETRY: Option<&str> = Some("Retry after a short delay");
const CHECK: Option<&str> = Some("Check the request and try again");

impl AppError {
    fn presentation(&self) -> Presentation {
        let (status, code, recoverable, action, sensitive, level) = match self {
            AppError::Database(_) => (500, "DATABASE_ERROR", true, RETRY, true, LogLevel::Error),
            AppError::S3(_) => (500, "STORAGE_ERROR", true, RETRY, true, LogLevel::Error),
            AppError::MediaConversionError(_) => (
                500,
                "MEDIA_CONVERSION_ERROR",
                false,
                Some("Check that the file is a valid MP4 video and try again"),
                true,
                LogLevel::Error,
            ),
            AppError::InvalidInput(_) => (400, "INVALID_INPUT", false, CHECK, false, LogLevel::Debug),
            AppError::BadRequest(_) => (400, "BAD_REQUEST", false, CHECK, false, LogLevel::Debug),
            AppError::NotFound(_) => (
                404,
                "NOT_FOUND",
                false,
                Some("Verify the video id exists"),
                false,
                LogLevel::Debug,
            ),
            AppError::Unauthorized(_) => (
                401,
                "UNAUTHORIZED",
                false,
                Some("Send a valid bearer token for the video's owner"),
                true,
                LogLevel::Warn,
            ),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                (500, "INTERNAL_ERROR", true, RETRY, true, LogLevel::Error)
            }
        };
        Presentation {
            status,
            code,
            recoverable,
            action,
            sensitive,
            level,
        }
    }

    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Database(_) => "Database",
            AppError::S3(_) => "S3",
            AppError::MediaConversionError(_) => "MediaConversionError",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::BadRequest(_) => "BadRequest",
            AppError::NotFound(_) => "NotFound",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        self.presentation().status
    }

    fn error_code(&self) -> &'static str {
        self.presentation().code
    }

    fn is_recoverable(&self) -> bool {
        self.presentation().recoverable
    }

    fn suggested_action(&self) -> Option<&'static str> {
        self.presentation().action
    }

    fn is_sensitive(&self) -> bool {
        self.presentation().sensitive
    }

    fn log_level(&self) -> LogLevel {
        self.presentation().level
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::S3(_) => "Failed to access storage".to_string(),
            AppError::MediaConversionError(_) => "Failed to process video".to_string(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::BadRequest(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            // The reason a credential was rejected is never echoed back.
            AppError::Unauthorized(_) => "Unauthorized".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
