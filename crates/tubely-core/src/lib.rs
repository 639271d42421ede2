//! Tubely Core Library
//!
//! This crate provides core domain models, error types and configuration
//! that are shared across all Tubely components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, VideoServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::VideoRecord;
pub use storage_types::StorageBackend;
