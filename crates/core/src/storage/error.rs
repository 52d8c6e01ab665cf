//! Error types for the storage module.

use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while moving bytes in or out of the library.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The original file for a media item is missing from the library.
    #[error("original file not found for media {media_id}")]
    OriginalMissing { media_id: Uuid },

    /// A derived artifact already exists and overwrite was disabled.
    #[error("artifact already exists: {path}")]
    ArtifactExists { path: PathBuf },

    /// Failed to copy a file.
    #[error("failed to copy {source} to {destination}")]
    CopyFailed {
        source: PathBuf,
        destination: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Creates a copy failed error.
    pub fn copy_failed(source: PathBuf, destination: PathBuf, error: std::io::Error) -> Self {
        Self::CopyFailed {
            source,
            destination,
            error,
        }
    }
}
