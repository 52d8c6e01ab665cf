//! Trait definitions for the transcoder module.

use async_trait::async_trait;
use std::path::Path;

use super::error::TranscodeError;

/// External transcoding collaborator for video and audio staging.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Returns the name of this transcoder implementation.
    fn name(&self) -> &str;

    /// Compresses a video into a capped-bitrate H.264+AAC MP4 at `output`.
    ///
    /// Failure (no output produced) is fatal to the media run.
    async fn compress_video(&self, input: &Path, output: &Path) -> Result<(), TranscodeError>;

    /// Grabs one frame at a fixed timestamp as a thumbnail image at `output`.
    ///
    /// Failure is tolerated: the run completes without a renderable source.
    async fn extract_frame(&self, input: &Path, output: &Path) -> Result<(), TranscodeError>;

    /// Compresses an audio file to MP3 at `output`.
    ///
    /// Failure (no output produced) is fatal to the media run.
    async fn compress_audio(&self, input: &Path, output: &Path) -> Result<(), TranscodeError>;
}
