//! Startup configuration checks beyond `Config::validate`.

use anyhow::Result;
use tubely_core::{Config, StorageBackend};

const LARGE_UPLOAD_WARN_BYTES: u64 = 5 * 1024 * 1024 * 1024;

/// Fail fast on invalid settings and warn about risky ones.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() && config.storage_backend() == StorageBackend::Local {
        tracing::warn!(
            path = ?config.local_storage_path(),
            "Local storage backend in production; assets are served from this host's disk"
        );
    }

    if config.max_video_size_bytes() as u64 > LARGE_UPLOAD_WARN_BYTES {
        tracing::warn!(
            max_video_size_bytes = config.max_video_size_bytes(),
            "Uploads above 5 GiB are buffered to local disk before processing"
        );
    }

    Ok(())
}
