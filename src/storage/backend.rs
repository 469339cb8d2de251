//! Filesystem blob store.
//!
//! Layout: `<root>/<object_id>/<filename>`. Writes go to `<root>/.staging` first and are
//! renamed into place, so a concurrent reader sees either the old or the new blob.

use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use super::key::ObjectKey;
use crate::error::{ContentError, Result};

const STAGING_DIR: &str = ".staging";

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(root.join(STAGING_DIR))?;
        Ok(Self { root })
    }

    fn blob_path(&self, key: &ObjectKey) -> PathBuf {
        self.root.join(key.relative_path())
    }

    pub async fn read(&self, key: &ObjectKey) -> Result<Option<Bytes>> {
        match tokio::fs::read(self.blob_path(key)).await {
            Ok(data) => {
                debug!("Read {} ({} bytes)", key, data.len());
                Ok(Some(Bytes::from(data)))
            }
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::NotFound | ErrorKind::IsADirectory | ErrorKind::NotADirectory
                ) =>
            {
                Ok(None)
            }
            Err(e) => {
                error!("Error while reading {}: {}", key, e);
                Err(e.into())
            }
        }
    }

    /// Persists `data` under `key`, replacing any previous blob.
    pub async fn write(&self, key: &ObjectKey, data: Bytes) -> Result<()> {
        let path = self.blob_path(key);

        if let Some(parent) = path.parent()
            && let Err(e) = tokio::fs::create_dir_all(parent).await
        {
            error!("Error while creating directory for {}: {}", key, e);
            return Err(e.into());
        }

        let staged = self
            .root
            .join(STAGING_DIR)
            .join(uuid::Uuid::new_v4().to_string());

        if let Err(e) = tokio::fs::write(&staged, &data).await {
            error!("Error while writing {}: {}", key, e);
            let _ = tokio::fs::remove_file(&staged).await;
            return Err(e.into());
        }

        if let Err(e) = tokio::fs::rename(&staged, &path).await {
            error!("Error while moving {} into place: {}", key, e);
            let _ = tokio::fs::remove_file(&staged).await;
            return Err(e.into());
        }

        debug!("Wrote {} ({} bytes)", key, data.len());
        Ok(())
    }

    /// Every stored key as `object_id/filename`, sorted.
    pub async fn list(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();

        let mut objects = tokio::fs::read_dir(&self.root).await.inspect_err(|e| {
            error!("Error while reading directory {}: {}", self.root.display(), e);
        })?;

        while let Some(object) = objects.next_entry().await? {
            let Some(object_id) = object.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if object_id.starts_with('.') || !object.file_type().await?.is_dir() {
                continue;
            }

            // Filenames may contain '/', so walk the object directory depth-first.
            let mut pending = vec![(object.path(), object_id)];
            while let Some((dir, prefix)) = pending.pop() {
                let mut entries = tokio::fs::read_dir(&dir).await.inspect_err(|e| {
                    error!("Error while reading directory {}: {}", dir.display(), e);
                })?;

                while let Some(entry) = entries.next_entry().await? {
                    let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                        tracing::warn!("Skipping non UTF-8 entry in {}", dir.display());
                        continue;
                    };
                    let key = format!("{}/{}", prefix, name);
                    if entry.file_type().await?.is_dir() {
                        pending.push((entry.path(), key));
                    } else {
                        keys.push(key);
                    }
                }
            }
        }

        keys.sort();
        Ok(keys)
    }

    pub async fn delete(&self, key: &ObjectKey) -> Result<()> {
        match tokio::fs::remove_file(self.blob_path(key)).await {
            Ok(()) => {
                debug!("Deleted {}", key);
                Ok(())
            }
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                Err(ContentError::NotFound(key.to_string()))
            }
            Err(e) => {
                error!("Error while deleting {}: {}", key, e);
                Err(e.into())
            }
        }
    }
}
