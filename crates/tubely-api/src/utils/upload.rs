//! Helpers for buffering multipart uploads to disk.

use std::path::Path;

use axum::extract::multipart::Field;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tubely_core::AppError;

/// Strip parameters and case: `"Video/MP4; codecs=avc1"` → `"video/mp4"`.
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Accept only the single configured media type. Parameters never bypass the check.
pub fn validate_content_type(content_type: Option<&str>, allowed: &str) -> Result<String, AppError> {
    let normalized = content_type.map(normalize_mime_type).unwrap_or_default();
    if normalized.split('/').count() != 2 {
        return Err(AppError::InvalidInput("Invalid Content-Type".to_string()));
    }
    if normalized != allowed {
        return Err(AppError::InvalidInput(format!(
            "Invalid file type, only {} is allowed",
            allowed
        )));
    }
    Ok(normalized)
}

fn size_limit_error(max_size: usize) -> AppError {
    AppError::InvalidInput(format!(
        "File size exceeds maximum allowed size of {} MB",
        max_size / 1024 / 1024
    ))
}

/// Stream a multipart field into a new temp file under `dir`, enforcing `max_size` per chunk.
///
/// The file is deleted when the returned handle is dropped, including on the error paths here.
pub async fn stream_field_to_temp_file(
    mut field: Field<'_>,
    dir: &Path,
    max_size: usize,
) -> Result<(NamedTempFile, u64), AppError> {
    let temp = tempfile::Builder::new()
        .prefix("tube-upload")
        .suffix(".mp4")
        .tempfile_in(dir)
        .map_err(|e| AppError::Internal(format!("Couldn't create temp file: {}", e)))?;

    let mut file = tokio::fs::File::from_std(
        temp.reopen()
            .map_err(|e| AppError::Internal(format!("Couldn't open temp file: {}", e)))?,
    );

    let mut written: usize = 0;
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?
    {
        written += chunk.len();
        if written > max_size {
            return Err(size_limit_error(max_size));
        }
        file.write_all(&chunk)
            .await
            .map_err(|e| AppError::Internal(format!("Couldn't write temp file: {}", e)))?;
    }

    file.flush()
        .await
        .map_err(|e| AppError::Internal(format!("Couldn't write temp file: {}", e)))?;

    if written == 0 {
        return Err(AppError::InvalidInput("File is empty".to_string()));
    }

    Ok((temp, written as u64))
}
