//! Probe → remux → classify → publish.

pub mod pipeline;
pub mod types;

pub use pipeline::{PipelineError, PublishPipeline};
pub use types::{PublishedAsset, ScopedFile, UploadStage};
