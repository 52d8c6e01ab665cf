//! Error types for the transform module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while applying a manipulation.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The input file could not be decoded as an image.
    #[error("failed to decode image {path}: {reason}")]
    DecodeFailed { path: PathBuf, reason: String },

    /// The output could not be encoded or written.
    #[error("failed to encode image {path}: {reason}")]
    EncodeFailed { path: PathBuf, reason: String },

    /// A manipulation's parameters do not apply to the image.
    #[error("invalid manipulation: {reason}")]
    InvalidManipulation { reason: String },

    /// A watermark overlay file is missing or unreadable.
    #[error("watermark not usable: {path}")]
    WatermarkUnusable { path: PathBuf },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransformError {
    /// Creates a decode failed error.
    pub fn decode_failed(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::DecodeFailed {
            path,
            reason: reason.into(),
        }
    }

    /// Creates an encode failed error.
    pub fn encode_failed(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::EncodeFailed {
            path,
            reason: reason.into(),
        }
    }
}
