//! The publish target seam.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::StorageBackend;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend rejected or failed the write.
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// An object store that published assets are written to.
///
/// `put` is a single whole-object write: the object either exists under `key`
/// afterwards or an error is returned. Re-putting a key overwrites it.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<()>;

    /// URL clients use to fetch the object under `key`. Pure; no I/O.
    fn public_url(&self, key: &str) -> String;

    fn backend_type(&self) -> StorageBackend;
}
