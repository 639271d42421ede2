//! Video inspection and container rewriting.

pub mod command;
pub mod geometry;
pub mod probe;
pub mod remux;

pub use command::{ToolCommand, ToolError, ToolOutput};
pub use geometry::{classify, reduce_aspect_ratio, Orientation};
pub use probe::{Dimensions, FfprobeProbe, ProbeError, StreamProbe};
pub use remux::{remux_output_path, FastStartRemuxer, FfmpegRemuxer, RemuxError};
