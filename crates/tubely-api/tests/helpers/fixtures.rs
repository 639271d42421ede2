use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use bytes::Bytes;
use tubely_core::{AppError, VideoRecord};
use tubely_db::{InMemoryVideoStore, VideoStore};
use tubely_processing::video::remux_output_path;
use tubely_processing::{
    Dimensions, FastStartRemuxer, ProbeError, RemuxError, StreamProbe, ToolError,
};
use tubely_storage::{Storage, StorageBackend, StorageError, StorageResult};
use uuid::Uuid;

/// Prefix the fake remuxer writes before the input bytes.
pub const REMUX_MARKER: &[u8] = b"faststart:";

/// Bytes that look enough like an MP4 for the fakes.
pub fn sample_video() -> Vec<u8> {
    let mut data = b"\x00\x00\x00\x18ftypmp42".to_vec();
    data.extend(std::iter::repeat(0xAB).take(4096));
    data
}

pub fn video_form(data: Vec<u8>, mime_type: &str) -> MultipartForm {
    let part = Part::bytes(Bytes::from(data))
        .file_name("boots.mp4")
        .mime_type(mime_type.to_string());
    MultipartForm::new().add_part("video", part)
}

/// Probe returning fixed dimensions, or failing like ffprobe on a bad file.
pub struct FakeProbe {
    dimensions: Option<Dimensions>,
    calls: AtomicUsize,
}

impl FakeProbe {
    pub fn reporting(dimensions: Dimensions) -> Self {
        Self {
            dimensions: Some(dimensions),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            dimensions: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StreamProbe for FakeProbe {
    async fn probe(&self, path: &Path) -> Result<Dimensions, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(path.exists(), "probe called on missing file");
        self.dimensions
            .ok_or_else(|| ProbeError::NoStreams(path.to_path_buf()))
    }
}

/// Remuxer writing `REMUX_MARKER` + input to the usual output path.
///
/// When failing, it leaves a partial output behind like an interrupted ffmpeg.
#[derive(Default)]
pub struct FakeRemuxer {
    fail: bool,
    calls: AtomicUsize,
}

impl FakeRemuxer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FastStartRemuxer for FakeRemuxer {
    async fn remux(&self, input: &Path) -> Result<PathBuf, RemuxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let output = remux_output_path(input);
        let mut data = REMUX_MARKER.to_vec();
        data.extend(std::fs::read(input).expect("remux input missing"));
        std::fs::write(&output, data).expect("Failed to write remux output");

        if self.fail {
            return Err(RemuxError::Execution(ToolError::TimedOut {
                tool: "ffmpeg".to_string(),
                timeout: Duration::from_secs(300),
            }));
        }
        Ok(output)
    }
}

/// Storage whose every write fails.
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn put(&self, key: &str, _content_type: &str, _data: Bytes) -> StorageResult<()> {
        Err(StorageError::UploadFailed(format!(
            "connection reset while writing {}",
            key
        )))
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://unreachable.example/{}", key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

/// Reads and creates through to an in-memory store; every update fails.
pub struct UpdateFailingStore {
    inner: InMemoryVideoStore,
}

impl UpdateFailingStore {
    pub fn new(inner: InMemoryVideoStore) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl VideoStore for UpdateFailingStore {
    async fn create_video(&self, video: &VideoRecord) -> Result<(), AppError> {
        self.inner.create_video(video).await
    }

    async fn get_video(&self, id: Uuid) -> Result<VideoRecord, AppError> {
        self.inner.get_video(id).await
    }

    async fn update_video(&self, _video: &VideoRecord) -> Result<(), AppError> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}
