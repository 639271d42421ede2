use std::sync::Arc;

use tubely_core::Config;

use crate::{Storage, StorageBackend, StorageError, StorageResult};

fn required<'a>(value: Option<&'a str>, name: &str) -> StorageResult<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| StorageError::ConfigError(format!("{} not configured", name)))
}

/// Build the publish target selected by `STORAGE_BACKEND`.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend() {
        StorageBackend::S3 => s3_from_config(config),
        StorageBackend::Local => local_from_config(config).await,
    }
}

#[cfg(feature = "storage-s3")]
fn s3_from_config(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let bucket = required(config.s3_bucket(), "S3_BUCKET")?;
    let region = required(config.s3_region(), "S3_REGION or AWS_REGION")?;
    let storage = crate::S3Storage::new(
        bucket.to_string(),
        region.to_string(),
        config.s3_endpoint().map(String::from),
    )?;
    Ok(Arc::new(storage))
}

#[cfg(not(feature = "storage-s3"))]
fn s3_from_config(_config: &Config) -> StorageResult<Arc<dyn Storage>> {
    Err(StorageError::ConfigError(
        "built without the storage-s3 feature".to_string(),
    ))
}

#[cfg(feature = "storage-local")]
async fn local_from_config(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let path = required(config.local_storage_path(), "LOCAL_STORAGE_PATH")?;
    let base_url = required(config.local_storage_base_url(), "LOCAL_STORAGE_BASE_URL")?;
    let storage = crate::LocalStorage::new(path, base_url.to_string()).await?;
    Ok(Arc::new(storage))
}

#[cfg(not(feature = "storage-local"))]
async fn local_from_config(_config: &Config) -> StorageResult<Arc<dyn Storage>> {
    Err(StorageError::ConfigError(
        "built without the storage-local feature".to_string(),
    ))
}
