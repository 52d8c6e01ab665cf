//! Error types for the bridge module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while converting a document through the bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The source document is missing.
    #[error("document not found: {path}")]
    InputNotFound { path: PathBuf },

    /// The conversion service could not be reached.
    #[error("conversion service unreachable: {reason}")]
    Unreachable { reason: String },

    /// The service answered, but the body is too small to be a real PDF.
    /// The service returns error pages with a success status; size is the
    /// only reliable signal.
    #[error("conversion service returned invalid output ({size} bytes, need at least {min})")]
    InvalidOutput { size: usize, min: usize },

    /// The retry budget was exhausted without a valid PDF.
    #[error("document conversion failed after {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },

    /// The process-wide service lock could not be acquired in time.
    #[error("timed out waiting for the conversion service lock after {timeout_secs} seconds")]
    LockTimeout { timeout_secs: u64 },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Creates an unreachable error.
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self::Unreachable {
            reason: reason.into(),
        }
    }

    /// Whether another attempt against the service makes sense.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Unreachable { .. } | Self::InvalidOutput { .. } | Self::LockTimeout { .. }
        )
    }
}
