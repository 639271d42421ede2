//! Publish pipeline for a buffered upload.
//!
//! Takes a video already on local disk and runs it through
//! probe → remux → classify → key → publish. The caller owns the source file;
//! the remuxed output is removed on every exit path.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;

use tubely_storage::{compose_storage_key, Storage, StorageError};

use super::types::{PublishedAsset, ScopedFile, UploadStage};
use crate::asset::IdentifierGenerator;
use crate::video::geometry::format_aspect_ratio;
use crate::video::{classify, remux_output_path, FastStartRemuxer, ProbeError, RemuxError, StreamProbe};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    Remux(#[from] RemuxError),

    #[error("failed to read remuxed file: {0}")]
    ReadOutput(#[source] std::io::Error),

    #[error(transparent)]
    Publish(#[from] StorageError),
}

impl PipelineError {
    /// Stage that was being entered when the failure occurred.
    pub fn failed_stage(&self) -> UploadStage {
        match self {
            PipelineError::Probe(_) => UploadStage::Probed,
            PipelineError::Remux(_) => UploadStage::Remuxed,
            PipelineError::ReadOutput(_) | PipelineError::Publish(_) => UploadStage::Published,
        }
    }
}

/// Shared, stateless pipeline; one instance serves all requests.
#[derive(Clone)]
pub struct PublishPipeline {
    probe: Arc<dyn StreamProbe>,
    remuxer: Arc<dyn FastStartRemuxer>,
    storage: Arc<dyn Storage>,
    identifiers: IdentifierGenerator,
}

impl PublishPipeline {
    pub fn new(
        probe: Arc<dyn StreamProbe>,
        remuxer: Arc<dyn FastStartRemuxer>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        Self {
            probe,
            remuxer,
            storage,
            identifiers: IdentifierGenerator::new(),
        }
    }

    /// Publish the video at `source` under a fresh key.
    ///
    /// `content_type` drives both the identifier extension and the stored
    /// object's content type. Nothing is published unless probe and remux succeed.
    pub async fn publish(
        &self,
        source: &Path,
        content_type: &str,
    ) -> Result<PublishedAsset, PipelineError> {
        let dimensions = self.probe.probe(source).await?;
        tracing::debug!(
            stage = %UploadStage::Probed,
            width = dimensions.width,
            height = dimensions.height,
            "Probed upload"
        );

        let _expected_output = ScopedFile::new(remux_output_path(source));
        let remuxed = ScopedFile::new(self.remuxer.remux(source).await?);
        tracing::debug!(
            stage = %UploadStage::Remuxed,
            output = %remuxed.path().display(),
            "Remuxed upload for fast start"
        );

        let orientation = classify(dimensions.width, dimensions.height);
        tracing::debug!(
            stage = %UploadStage::Classified,
            orientation = %orientation,
            aspect_ratio = %format_aspect_ratio(dimensions.width, dimensions.height),
            "Classified upload"
        );

        let asset = self.identifiers.generate(content_type);
        let storage_key = compose_storage_key(orientation.storage_prefix(), asset.as_str());

        let data = tokio::fs::read(remuxed.path())
            .await
            .map_err(PipelineError::ReadOutput)?;
        let size_bytes = data.len() as u64;

        self.storage
            .put(&storage_key, content_type, Bytes::from(data))
            .await?;
        let url = self.storage.public_url(&storage_key);

        tracing::info!(
            stage = %UploadStage::Published,
            storage_key = %storage_key,
            size_bytes = size_bytes,
            "Published video asset"
        );

        Ok(PublishedAsset {
            storage_key,
            url,
            dimensions,
            orientation,
            size_bytes,
        })
    }
}
