//! Test helpers: build AppState and router for integration tests.
//!
//! Everything runs in-process: records live in an [`InMemoryVideoStore`],
//! assets in a local storage temp dir, and ffprobe/ffmpeg are replaced by the
//! recording fakes in [`fixtures`].

pub mod auth;
pub mod fixtures;

use std::path::Path;
use std::sync::Arc;

use axum_test::TestServer;
use tempfile::TempDir;
use tubely_api::constants;
use tubely_api::setup::routes;
use tubely_api::state::{AppState, SecurityConfig, UploadConfig};
use tubely_core::VideoRecord;
use tubely_db::{InMemoryVideoStore, VideoStore};
use tubely_processing::{Dimensions, PublishPipeline};
use tubely_storage::{LocalStorage, Storage};
use uuid::Uuid;

use fixtures::{FailingStorage, FakeProbe, FakeRemuxer, UpdateFailingStore};

pub const TEST_ASSETS_BASE_URL: &str = "http://localhost:8091/assets";

/// Small enough that a test can exceed it without allocating much.
pub const TEST_MAX_VIDEO_SIZE_BYTES: usize = 64 * 1024;

/// API path for uploading into a video record.
pub fn upload_path(video_id: impl std::fmt::Display) -> String {
    format!("{}/video_upload/{}", constants::API_PREFIX, video_id)
}

/// Test application: server, fakes and owned temp directories.
pub struct TestApp {
    pub server: TestServer,
    pub videos: InMemoryVideoStore,
    pub probe: Arc<FakeProbe>,
    pub remuxer: Arc<FakeRemuxer>,
    pub assets_dir: TempDir,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Insert a draft record owned by `user_id`.
    pub async fn create_video(&self, user_id: Uuid) -> VideoRecord {
        let video = VideoRecord::new(user_id, "Boots".to_string(), "A test video".to_string());
        self.videos
            .create_video(&video)
            .await
            .expect("Failed to insert test video");
        video
    }

    pub async fn get_video(&self, id: Uuid) -> VideoRecord {
        self.videos.get_video(id).await.expect("Video not found")
    }

    /// Every file published under the assets dir, as paths relative to it.
    pub fn published_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_files(self.assets_dir.path(), self.assets_dir.path(), &mut keys);
        keys.sort();
        keys
    }

    /// Number of entries left in the upload temp dir.
    pub fn leftover_temp_files(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path())
            .expect("Failed to read upload dir")
            .count()
    }
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<String>) {
    for entry in std::fs::read_dir(dir).expect("Failed to read assets dir") {
        let path = entry.expect("Failed to read dir entry").path();
        if path.is_dir() {
            collect_files(root, &path, out);
        } else {
            let rel = path.strip_prefix(root).expect("Path outside assets root");
            out.push(rel.to_string_lossy().replace('\\', "/"));
        }
    }
}

/// Knobs for [`setup_test_app_with_options`].
pub struct TestAppOptions {
    pub probe: FakeProbe,
    pub remuxer: FakeRemuxer,
    /// Every `put` fails like an unreachable bucket.
    pub fail_publish: bool,
    /// `update_video` fails after the object is published.
    pub fail_record_update: bool,
    pub is_production: bool,
}

impl Default for TestAppOptions {
    fn default() -> Self {
        Self {
            probe: FakeProbe::reporting(Dimensions::new(1920, 1080)),
            remuxer: FakeRemuxer::new(),
            fail_publish: false,
            fail_record_update: false,
            is_production: false,
        }
    }
}

/// Setup a test app whose probe reports a 1920x1080 stream.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_options(TestAppOptions::default()).await
}

pub async fn setup_test_app_with(probe: FakeProbe, remuxer: FakeRemuxer) -> TestApp {
    setup_test_app_with_options(TestAppOptions {
        probe,
        remuxer,
        ..TestAppOptions::default()
    })
    .await
}

pub async fn setup_test_app_with_options(options: TestAppOptions) -> TestApp {
    let assets_dir = TempDir::new().expect("Failed to create assets dir");
    let upload_dir = TempDir::new().expect("Failed to create upload dir");

    let storage: Arc<dyn Storage> = if options.fail_publish {
        Arc::new(FailingStorage)
    } else {
        Arc::new(
            LocalStorage::new(assets_dir.path(), TEST_ASSETS_BASE_URL.to_string())
                .await
                .expect("Failed to create local storage"),
        )
    };

    let probe = Arc::new(options.probe);
    let remuxer = Arc::new(options.remuxer);
    let videos = InMemoryVideoStore::new();
    let store: Arc<dyn VideoStore> = if options.fail_record_update {
        Arc::new(UpdateFailingStore::new(videos.clone()))
    } else {
        Arc::new(videos.clone())
    };

    let state = Arc::new(AppState {
        videos: store,
        pipeline: PublishPipeline::new(probe.clone(), remuxer.clone(), storage),
        upload: UploadConfig {
            max_video_size_bytes: TEST_MAX_VIDEO_SIZE_BYTES,
            allowed_content_type: "video/mp4".to_string(),
            temp_dir: upload_dir.path().to_path_buf(),
        },
        security: SecurityConfig {
            jwt_secret: auth::TEST_JWT_SECRET.to_string(),
            cors_origins: vec!["http://localhost:3000".to_string()],
            is_production: options.is_production,
        },
        assets_dir: Some(assets_dir.path().to_path_buf()),
    });

    let app = routes::setup_routes(state).expect("Failed to build routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        videos,
        probe,
        remuxer,
        assets_dir,
        upload_dir,
    }
}
