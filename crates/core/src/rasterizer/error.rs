//! Error types for the rasterizer module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while rasterizing a PDF page.
#[derive(Debug, Error)]
pub enum RasterizeError {
    /// Rasterizer binary not found.
    #[error("rasterizer binary not found at path: {path}")]
    BinaryNotFound { path: PathBuf },

    /// The input PDF is missing.
    #[error("PDF not found: {path}")]
    InputNotFound { path: PathBuf },

    /// The rasterizer ran but produced no image.
    #[error("rasterization produced no output: {reason}")]
    NoOutput { reason: String },

    /// The rasterizer exceeded its deadline.
    #[error("rasterization timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RasterizeError {
    /// Creates a no-output error.
    pub fn no_output(reason: impl Into<String>) -> Self {
        Self::NoOutput {
            reason: reason.into(),
        }
    }
}
