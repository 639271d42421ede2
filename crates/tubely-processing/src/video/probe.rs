//! Stream dimension probing via ffprobe.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use super::command::{ToolCommand, ToolError};

/// Pixel geometry of a single video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("ffprobe execution failed: {0}")]
    Execution(#[source] ToolError),

    #[error("could not parse ffprobe output: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("no streams found in {0}")]
    NoStreams(PathBuf),
}

/// Reads the dimensions of the first stream of a local media file.
#[async_trait]
pub trait StreamProbe: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<Dimensions, ProbeError>;
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
}

/// Extract the first stream's dimensions from `ffprobe -print_format json -show_streams` output.
///
/// A first stream without `width`/`height` (e.g. audio) reads as 0x0.
pub fn parse_probe_output(stdout: &[u8], path: &Path) -> Result<Dimensions, ProbeError> {
    let output: ProbeOutput = serde_json::from_slice(stdout).map_err(ProbeError::Parse)?;
    let first = output
        .streams
        .first()
        .ok_or_else(|| ProbeError::NoStreams(path.to_path_buf()))?;
    Ok(Dimensions::new(first.width, first.height))
}

/// [`StreamProbe`] backed by the `ffprobe` binary.
#[derive(Debug, Clone)]
pub struct FfprobeProbe {
    ffprobe_path: PathBuf,
    timeout: Duration,
}

impl FfprobeProbe {
    pub fn new(ffprobe_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
            timeout,
        }
    }
}

#[async_trait]
impl StreamProbe for FfprobeProbe {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        process.executable.path = %self.ffprobe_path.display(),
        ffmpeg.operation = "probe"
    ))]
    async fn probe(&self, path: &Path) -> Result<Dimensions, ProbeError> {
        let start = std::time::Instant::now();

        let output = ToolCommand::new(&self.ffprobe_path)
            .args(["-v", "error", "-print_format", "json", "-show_streams"])
            .arg(path.to_string_lossy())
            .timeout(self.timeout)
            .execute()
            .await
            .map_err(ProbeError::Execution)?;

        let dimensions = parse_probe_output(&output.stdout, path)?;

        tracing::debug!(
            width = dimensions.width,
            height = dimensions.height,
            duration_ms = start.elapsed().as_millis() as u64,
            "ffprobe completed"
        );

        Ok(dimensions)
    }
}
