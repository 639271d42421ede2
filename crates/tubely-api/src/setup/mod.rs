//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;
pub mod validation;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use tubely_core::{Config, StorageBackend};
use tubely_db::VideoRepository;
use tubely_processing::{FfmpegRemuxer, FfprobeProbe, PublishPipeline};
use tubely_storage::create_storage;

use crate::state::{AppState, SecurityConfig, UploadConfig};

/// Build state and router from configuration.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router)> {
    validation::validate_config(&config)?;

    let pool = database::setup_database(&config).await?;

    let storage = create_storage(&config)
        .await
        .context("Failed to initialize storage backend")?;
    tracing::info!(backend = %storage.backend_type(), "Storage backend initialized");

    let timeout = Duration::from_secs(config.process_timeout_secs());
    let pipeline = PublishPipeline::new(
        Arc::new(FfprobeProbe::new(config.ffprobe_path(), timeout)),
        Arc::new(FfmpegRemuxer::new(config.ffmpeg_path(), timeout)),
        storage,
    );

    let temp_dir = config.upload_temp_dir();
    tokio::fs::create_dir_all(&temp_dir)
        .await
        .with_context(|| format!("Failed to create upload temp dir {}", temp_dir.display()))?;

    let assets_dir = match config.storage_backend() {
        StorageBackend::Local => config.local_storage_path().map(PathBuf::from),
        StorageBackend::S3 => None,
    };

    let state = Arc::new(AppState {
        videos: Arc::new(VideoRepository::new(pool)),
        pipeline,
        upload: UploadConfig {
            max_video_size_bytes: config.max_video_size_bytes(),
            allowed_content_type: config.video_allowed_content_type().to_string(),
            temp_dir,
        },
        security: SecurityConfig {
            jwt_secret: config.jwt_secret().to_string(),
            cors_origins: config.cors_origins().to_vec(),
            is_production: config.is_production(),
        },
        assets_dir,
    });

    let router = routes::setup_routes(state.clone())?;

    Ok((state, router))
}
