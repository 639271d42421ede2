//! Application state.
//!
//! Split into small sub-configs so tests can assemble a state without a
//! database or a full environment-backed `Config`.

use std::path::PathBuf;
use std::sync::Arc;

use tubely_db::VideoStore;
use tubely_processing::PublishPipeline;

/// Limits applied while buffering an upload.
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub max_video_size_bytes: usize,
    /// Normalized `type/subtype`; the only media type accepted.
    pub allowed_content_type: String,
    /// Directory that holds buffered uploads and remux output.
    pub temp_dir: PathBuf,
}

#[derive(Clone, Debug)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub cors_origins: Vec<String>,
    /// Hide error details from response bodies.
    pub is_production: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub videos: Arc<dyn VideoStore>,
    pub pipeline: PublishPipeline,
    pub upload: UploadConfig,
    pub security: SecurityConfig,
    /// Directory served under `/assets` when publishing to local storage.
    pub assets_dir: Option<PathBuf>,
}
