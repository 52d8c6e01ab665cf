//! Type-specific staging: original file to renderable source.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::bridge::OfficeToPdfBridge;
use crate::media::{MediaDescriptor, MediaType};
use crate::rasterizer::PdfRasterizer;
use crate::storage::Storage;
use crate::transcoder::Transcoder;

use super::error::PipelineError;
use super::workdir::WorkingDirectory;

/// Result of the staging pipeline for one media item.
#[derive(Debug)]
pub enum StagingOutcome {
    /// A raster image exists for the per-conversion manipulations to consume.
    Renderable(PathBuf),
    /// No visual source exists (audio, or video whose frame grab failed);
    /// the run completes without image derivatives.
    Finished,
}

/// Runs the per-type staging steps and persists staging side-artifacts.
pub(super) struct Stager {
    pub storage: Arc<dyn Storage>,
    pub rasterizer: Arc<dyn PdfRasterizer>,
    pub bridge: Arc<OfficeToPdfBridge>,
    pub transcoder: Arc<dyn Transcoder>,
}

impl Stager {
    /// Turns the copied original into a [`StagingOutcome`].
    ///
    /// Fatal staging failures (bridge exhaustion, transcode without output,
    /// rasterization errors) propagate as `ConversionFailed`; the caller's
    /// working directory guard releases intermediates regardless.
    pub async fn stage(
        &self,
        media: &MediaDescriptor,
        workdir: &WorkingDirectory,
        original: &Path,
    ) -> Result<StagingOutcome, PipelineError> {
        match media.media_type {
            MediaType::Image => Ok(StagingOutcome::Renderable(original.to_path_buf())),

            MediaType::Pdf => {
                let image = self.rasterizer.rasterize_first_page(original).await?;
                Ok(StagingOutcome::Renderable(image))
            }

            MediaType::Word | MediaType::Ppt => {
                let pdf = workdir.random_file("pdf");
                self.bridge.convert_to_pdf(original, &pdf).await?;
                self.storage
                    .copy_to_library(&pdf, media, true, Some("thumb.pdf"))
                    .await?;

                let image = self.rasterizer.rasterize_first_page(&pdf).await?;
                Ok(StagingOutcome::Renderable(image))
            }

            MediaType::Video => {
                let mp4 = workdir.random_file("mp4");
                self.transcoder.compress_video(original, &mp4).await?;
                self.storage
                    .copy_to_library(&mp4, media, true, Some("thumb.mp4"))
                    .await?;

                let frame = workdir.random_file("jpg");
                match self.transcoder.extract_frame(original, &frame).await {
                    Ok(()) => Ok(StagingOutcome::Renderable(frame)),
                    Err(error) => {
                        // Best effort only: a missing thumbnail must not
                        // block notifying dependents.
                        warn!(media_id = %media.id, %error, "frame extraction failed, continuing without renderable");
                        Ok(StagingOutcome::Finished)
                    }
                }
            }

            MediaType::Audio => {
                let mp3 = workdir.random_file("mp3");
                self.transcoder.compress_audio(original, &mp3).await?;
                self.storage
                    .copy_to_library(&mp3, media, true, Some("thumb.mp3"))
                    .await?;

                debug!(media_id = %media.id, "audio staged, no visual source");
                Ok(StagingOutcome::Finished)
            }

            // Unreachable through the orchestrator's entry policy.
            MediaType::Other => Ok(StagingOutcome::Finished),
        }
    }
}
