use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;
use std::sync::Arc;

use super::ContentService;
use crate::error::Result;
use crate::storage::{FsBackend, ObjectKey};

/// Serves content straight from a local storage directory.
pub struct LocalContentService {
    backend: Arc<FsBackend>,
}

impl LocalContentService {
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_backend(Arc::new(FsBackend::new(root)?)))
    }

    pub fn from_backend(backend: Arc<FsBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl ContentService for LocalContentService {
    async fn read(&self, object_id: &str, filename: &str) -> Result<Option<Bytes>> {
        self.backend
            .read(&ObjectKey::new(object_id, filename)?)
            .await
    }

    async fn write(&self, object_id: &str, filename: &str, data: Bytes) -> Result<()> {
        self.backend
            .write(&ObjectKey::new(object_id, filename)?, data)
            .await
    }
}
