use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tubely_core::{AppError, VideoRecord};
use uuid::Uuid;

use crate::video::VideoStore;

/// Process-local [`VideoStore`].
#[derive(Clone, Default)]
pub struct InMemoryVideoStore {
    videos: Arc<RwLock<HashMap<Uuid, VideoRecord>>>,
}

impl InMemoryVideoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.videos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.videos.read().await.is_empty()
    }
}

#[async_trait]
impl VideoStore for InMemoryVideoStore {
    async fn create_video(&self, video: &VideoRecord) -> Result<(), AppError> {
        let mut videos = self.videos.write().await;
        if videos.contains_key(&video.id) {
            return Err(AppError::BadRequest(format!(
                "Video {} already exists",
                video.id
            )));
        }
        videos.insert(video.id, video.clone());
        Ok(())
    }

    async fn get_video(&self, id: Uuid) -> Result<VideoRecord, AppError> {
        self.videos
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))
    }

    async fn update_video(&self, video: &VideoRecord) -> Result<(), AppError> {
        let mut videos = self.videos.write().await;
        match videos.get_mut(&video.id) {
            Some(existing) => {
                *existing = video.clone();
                Ok(())
            }
            None => Err(AppError::NotFound("Couldn't find video".to_string())),
        }
    }
}
