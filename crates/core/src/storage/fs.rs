//! Filesystem-backed storage implementation.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::media::MediaDescriptor;

use super::error::StorageError;
use super::traits::Storage;

/// Local-directory storage: one directory per media id under a root,
/// original file stored under its upload name, derived artifacts beside it.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Creates a storage rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding all files of one media item.
    pub fn media_dir(&self, media: &MediaDescriptor) -> PathBuf {
        self.root.join(media.id.to_string())
    }

    /// Path of the original file for one media item.
    pub fn original_path(&self, media: &MediaDescriptor) -> PathBuf {
        self.media_dir(media).join(&media.file_name)
    }
}

#[async_trait]
impl Storage for FsStorage {
    fn name(&self) -> &str {
        "fs"
    }

    async fn copy_from_library(
        &self,
        media: &MediaDescriptor,
        dest: &Path,
    ) -> Result<(), StorageError> {
        let source = self.original_path(media);
        if !source.exists() {
            return Err(StorageError::OriginalMissing { media_id: media.id });
        }

        tokio::fs::copy(&source, dest)
            .await
            .map_err(|e| StorageError::copy_failed(source.clone(), dest.to_path_buf(), e))?;

        debug!(media_id = %media.id, dest = %dest.display(), "copied original out of library");
        Ok(())
    }

    async fn copy_to_library(
        &self,
        source: &Path,
        media: &MediaDescriptor,
        overwrite: bool,
        name: Option<&str>,
    ) -> Result<(), StorageError> {
        let file_name = match name {
            Some(name) => name.to_string(),
            None => source
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| media.file_name.clone()),
        };

        let dir = self.media_dir(media);
        tokio::fs::create_dir_all(&dir).await?;

        let destination = dir.join(&file_name);
        if destination.exists() && !overwrite {
            return Err(StorageError::ArtifactExists { path: destination });
        }

        tokio::fs::copy(source, &destination)
            .await
            .map_err(|e| StorageError::copy_failed(source.to_path_buf(), destination.clone(), e))?;

        debug!(media_id = %media.id, artifact = %file_name, "persisted artifact");
        Ok(())
    }
}
