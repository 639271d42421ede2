//! Fast-start remux: move the MP4 index to the front of the file.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::command::{ToolCommand, ToolError};

const OUTPUT_SUFFIX: &str = ".processing";

#[derive(Debug, Error)]
pub enum RemuxError {
    #[error("ffmpeg execution failed: {0}")]
    Execution(#[source] ToolError),
}

/// Rewrites a local video for progressive playback.
///
/// Implementations write to [`remux_output_path`] and never touch the input.
/// The caller owns cleanup of both files.
#[async_trait]
pub trait FastStartRemuxer: Send + Sync {
    async fn remux(&self, input: &Path) -> Result<PathBuf, RemuxError>;
}

/// Sibling of `input` with `.processing` appended.
pub fn remux_output_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(OUTPUT_SUFFIX);
    PathBuf::from(name)
}

/// [`FastStartRemuxer`] backed by the `ffmpeg` binary. Streams are copied, not re-encoded.
#[derive(Debug, Clone)]
pub struct FfmpegRemuxer {
    ffmpeg_path: PathBuf,
    timeout: Duration,
}

impl FfmpegRemuxer {
    pub fn new(ffmpeg_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            timeout,
        }
    }
}

#[async_trait]
impl FastStartRemuxer for FfmpegRemuxer {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffmpeg",
        process.executable.path = %self.ffmpeg_path.display(),
        ffmpeg.operation = "faststart"
    ))]
    async fn remux(&self, input: &Path) -> Result<PathBuf, RemuxError> {
        let start = std::time::Instant::now();
        let output = remux_output_path(input);

        ToolCommand::new(&self.ffmpeg_path)
            .args(["-y", "-i"])
            .arg(input.to_string_lossy())
            .args(["-c", "copy", "-movflags", "faststart", "-f", "mp4"])
            .arg(output.to_string_lossy())
            .timeout(self.timeout)
            .execute()
            .await
            .map_err(RemuxError::Execution)?;

        tracing::debug!(
            output = %output.display(),
            duration_ms = start.elapsed().as_millis() as u64,
            "ffmpeg faststart remux completed"
        );

        Ok(output)
    }
}
