//! Error types for the transcoder module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during a staging transcode.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// FFmpeg binary not found.
    #[error("ffmpeg not found at path: {path}")]
    FfmpegNotFound { path: PathBuf },

    /// Input file not found.
    #[error("input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// The process ran but the expected output file is absent.
    #[error("transcode produced no output: {reason}")]
    NoOutput { reason: String },

    /// The transcode exceeded its deadline.
    #[error("transcode timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TranscodeError {
    /// Creates a no-output error.
    pub fn no_output(reason: impl Into<String>) -> Self {
        Self::NoOutput {
            reason: reason.into(),
        }
    }
}
