//! Types for the upload pipeline.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};

use crate::video::{Dimensions, Orientation};

/// Where a single upload request currently is. Terminal on the first failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    Received,
    Authorized,
    Buffered,
    Probed,
    Remuxed,
    Classified,
    Published,
    Recorded,
    Done,
}

impl Display for UploadStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = match self {
            UploadStage::Received => "received",
            UploadStage::Authorized => "authorized",
            UploadStage::Buffered => "buffered",
            UploadStage::Probed => "probed",
            UploadStage::Remuxed => "remuxed",
            UploadStage::Classified => "classified",
            UploadStage::Published => "published",
            UploadStage::Recorded => "recorded",
            UploadStage::Done => "done",
        };
        f.write_str(s)
    }
}

/// Result of publishing one video.
#[derive(Debug, Clone)]
pub struct PublishedAsset {
    pub storage_key: String,
    pub url: String,
    pub dimensions: Dimensions,
    pub orientation: Orientation,
    pub size_bytes: u64,
}

/// Deletes the file at `path` when dropped.
///
/// Missing files are fine; the guarded path may never have been created.
#[derive(Debug)]
pub struct ScopedFile {
    path: PathBuf,
}

impl ScopedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScopedFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                error = %e,
                path = %self.path.display(),
                "Failed to remove temporary file"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_file_removes_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.mp4.processing");
        std::fs::write(&path, b"x").unwrap();
        {
            let guard = ScopedFile::new(&path);
            assert!(guard.path().exists());
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_scoped_file_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        drop(ScopedFile::new(dir.path().join("never-created")));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(UploadStage::Probed.to_string(), "probed");
        assert_eq!(UploadStage::Done.to_string(), "done");
    }
}
