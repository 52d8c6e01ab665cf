//! Error taxonomy of the pipeline.

use thiserror::Error;

use crate::bridge::BridgeError;
use crate::jobs::DispatchError;
use crate::rasterizer::RasterizeError;
use crate::storage::StorageError;
use crate::transcoder::TranscodeError;
use crate::transform::TransformError;

/// Fatal conditions of a derived-file run. All of these propagate to the
/// caller of `create_derived_files`; nothing above the bridge's own retry
/// loop retries.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The PDF rasterization capability is required for this media type but
    /// unavailable. Raised before any work is attempted.
    #[error("PDF rasterization capability missing for {media_type} media")]
    CapabilityMissing { media_type: String },

    /// A staging conversion failed: the office bridge exhausted its retries,
    /// or a video/audio transcode produced no output.
    #[error("staging conversion failed: {reason}")]
    ConversionFailed {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A single image operation within one conversion errored. Fatal to the
    /// whole run: sibling conversions are aborted too.
    #[error("manipulation failed in conversion '{conversion}': {source}")]
    ManipulationFailed {
        conversion: String,
        #[source]
        source: TransformError,
    },

    /// Storage collaborator failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Queued subset could not be handed to the dispatcher.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// I/O error in the working directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Creates a conversion failed error without an underlying source.
    pub fn conversion_failed(reason: impl Into<String>) -> Self {
        Self::ConversionFailed {
            reason: reason.into(),
            source: None,
        }
    }
}

impl From<BridgeError> for PipelineError {
    fn from(error: BridgeError) -> Self {
        Self::ConversionFailed {
            reason: "office-to-PDF bridge failed".to_string(),
            source: Some(Box::new(error)),
        }
    }
}

impl From<TranscodeError> for PipelineError {
    fn from(error: TranscodeError) -> Self {
        Self::ConversionFailed {
            reason: "transcode produced no output".to_string(),
            source: Some(Box::new(error)),
        }
    }
}

impl From<RasterizeError> for PipelineError {
    fn from(error: RasterizeError) -> Self {
        Self::ConversionFailed {
            reason: "PDF rasterization failed".to_string(),
            source: Some(Box::new(error)),
        }
    }
}
