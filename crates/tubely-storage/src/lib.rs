//! Tubely Storage Library
//!
//! Object storage abstraction for published video assets, with an S3 backend
//! (via `object_store`) and a local filesystem backend.
//!
//! # Storage key format
//!
//! Every published asset lives under `{orientation-prefix}/{asset-identifier}`,
//! e.g. `landscape/3q2-…Zk.mp4`. Keys must not contain `..` or a leading `/`.
//! Composition and validation are centralized in [`keys`] so both backends agree.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::compose_storage_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use tubely_core::StorageBackend;
