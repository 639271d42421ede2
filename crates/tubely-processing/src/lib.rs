//! Tubely Processing Library
//!
//! Everything between "bytes are on local disk" and "object is published":
//! asset identifiers, geometry classification, ffprobe/ffmpeg invocation and
//! the probe → remux → classify → publish pipeline.

pub mod asset;
pub mod upload;
pub mod video;

pub use asset::{AssetIdentifier, EntropyError, IdentifierGenerator};
pub use upload::{PipelineError, PublishPipeline, PublishedAsset, ScopedFile, UploadStage};
pub use video::{
    classify, Dimensions, FastStartRemuxer, FfmpegRemuxer, FfprobeProbe, Orientation,
    ProbeError, RemuxError, StreamProbe, ToolCommand, ToolError,
};
