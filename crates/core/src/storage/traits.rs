//! Trait definitions for the storage module.

use async_trait::async_trait;
use std::path::Path;

use crate::media::MediaDescriptor;

use super::error::StorageError;

/// Durable storage of original and derived media bytes.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Returns the name of this storage implementation.
    fn name(&self) -> &str;

    /// Copies the original bytes of `media` out of the library to `dest`.
    async fn copy_from_library(
        &self,
        media: &MediaDescriptor,
        dest: &Path,
    ) -> Result<(), StorageError>;

    /// Copies a produced file into the library under the media item.
    ///
    /// The artifact is stored under `name` when given, otherwise under the
    /// source file's name. With `overwrite` disabled an existing artifact
    /// is an error.
    async fn copy_to_library(
        &self,
        source: &Path,
        media: &MediaDescriptor,
        overwrite: bool,
        name: Option<&str>,
    ) -> Result<(), StorageError>;
}
