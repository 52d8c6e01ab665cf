//! Mock storage for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use uuid::Uuid;

use crate::media::MediaDescriptor;
use crate::storage::{Storage, StorageError};

/// One artifact that was copied into the library.
#[derive(Debug, Clone)]
pub struct PersistedArtifact {
    /// Media the artifact belongs to.
    pub media_id: Uuid,
    /// File name the artifact was stored under.
    pub file_name: String,
    /// The stored bytes.
    pub bytes: Vec<u8>,
}

/// In-memory implementation of the [`Storage`] trait.
///
/// Originals are seeded with [`seed_original`](MockStorage::seed_original);
/// everything the pipeline persists is recorded in order for assertions.
#[derive(Debug, Default)]
pub struct MockStorage {
    originals: Mutex<HashMap<Uuid, Vec<u8>>>,
    persisted: Mutex<Vec<PersistedArtifact>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the original bytes for a media item.
    pub fn seed_original(&self, media: &MediaDescriptor, bytes: Vec<u8>) {
        self.originals.lock().unwrap().insert(media.id, bytes);
    }

    /// Everything persisted so far, in persistence order.
    pub fn persisted(&self) -> Vec<PersistedArtifact> {
        self.persisted.lock().unwrap().clone()
    }

    /// File names persisted for one media item, in persistence order.
    pub fn persisted_names(&self, media: &MediaDescriptor) -> Vec<String> {
        self.persisted
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.media_id == media.id)
            .map(|a| a.file_name.clone())
            .collect()
    }
}

#[async_trait]
impl Storage for MockStorage {
    fn name(&self) -> &str {
        "mock"
    }

    async fn copy_from_library(
        &self,
        media: &MediaDescriptor,
        dest: &Path,
    ) -> Result<(), StorageError> {
        let bytes = self
            .originals
            .lock()
            .unwrap()
            .get(&media.id)
            .cloned()
            .ok_or(StorageError::OriginalMissing { media_id: media.id })?;
        tokio::fs::write(dest, bytes).await?;
        Ok(())
    }

    async fn copy_to_library(
        &self,
        source: &Path,
        media: &MediaDescriptor,
        overwrite: bool,
        name: Option<&str>,
    ) -> Result<(), StorageError> {
        let file_name = name
            .map(str::to_string)
            .or_else(|| {
                source
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
            })
            .unwrap_or_else(|| "artifact".to_string());

        let mut persisted = self.persisted.lock().unwrap();
        let exists = persisted
            .iter()
            .any(|a| a.media_id == media.id && a.file_name == file_name);
        if exists && !overwrite {
            return Err(StorageError::ArtifactExists {
                path: source.to_path_buf(),
            });
        }

        let bytes = std::fs::read(source)?;
        persisted.push(PersistedArtifact {
            media_id: media.id,
            file_name,
            bytes,
        });
        Ok(())
    }
}
