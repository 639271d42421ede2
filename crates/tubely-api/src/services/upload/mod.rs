//! Video upload orchestration.

pub mod service;

pub use service::{BufferedUpload, VideoUploadService};
