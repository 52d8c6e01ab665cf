//! The derived-file orchestrator.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::bridge::OfficeToPdfBridge;
use crate::conversion::{ConversionDefinition, ConversionRegistry};
use crate::events::{CompletionPolicy, ConversionCompleted, EventNotifier};
use crate::jobs::{JobDispatcher, QueuedConversions};
use crate::media::{MediaDescriptor, MediaType};
use crate::metrics;
use crate::rasterizer::PdfRasterizer;
use crate::storage::Storage;
use crate::transcoder::Transcoder;
use crate::transform::ImageTransformer;
use std::path::{Path, PathBuf};

use super::config::PipelineConfig;
use super::error::PipelineError;
use super::staging::{Stager, StagingOutcome};
use super::workdir::WorkingDirectory;

/// Drives derived-file generation for one media item at a time.
///
/// All collaborators are injected; the orchestrator owns only sequencing,
/// working-directory lifetime and the error taxonomy.
pub struct DerivedFileOrchestrator {
    storage: Arc<dyn Storage>,
    transformer: Arc<dyn ImageTransformer>,
    rasterizer: Arc<dyn PdfRasterizer>,
    notifier: Arc<dyn EventNotifier>,
    dispatcher: Arc<dyn JobDispatcher>,
    stager: Stager,
    registry: ConversionRegistry,
    config: PipelineConfig,
}

impl DerivedFileOrchestrator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        storage: Arc<dyn Storage>,
        transformer: Arc<dyn ImageTransformer>,
        rasterizer: Arc<dyn PdfRasterizer>,
        bridge: Arc<OfficeToPdfBridge>,
        transcoder: Arc<dyn Transcoder>,
        notifier: Arc<dyn EventNotifier>,
        dispatcher: Arc<dyn JobDispatcher>,
        registry: ConversionRegistry,
        config: PipelineConfig,
    ) -> Self {
        let stager = Stager {
            storage: storage.clone(),
            rasterizer: rasterizer.clone(),
            bridge,
            transcoder,
        };
        Self {
            storage,
            transformer,
            rasterizer,
            notifier,
            dispatcher,
            stager,
            registry,
            config,
        }
    }

    /// Entry point: generates all derived files for `media`.
    ///
    /// Runs the non-queued subset of the collection's conversions inline
    /// and hands the queued subset to the dispatcher. For media of an
    /// unknown type this is a no-op; for document media it fails fast with
    /// `CapabilityMissing` when no rasterizer is usable, before any file
    /// is touched.
    #[instrument(skip(self), fields(media_id = %media.id, media_type = media.media_type.as_str()))]
    pub async fn create_derived_files(
        &self,
        media: &MediaDescriptor,
    ) -> Result<(), PipelineError> {
        if media.media_type == MediaType::Other {
            debug!("no derivatives for this media type");
            metrics::PIPELINE_RUNS.with_label_values(&["skipped"]).inc();
            return Ok(());
        }

        if media.media_type.needs_rasterizer() && !self.rasterizer.available().await {
            metrics::PIPELINE_RUNS.with_label_values(&["failed"]).inc();
            return Err(PipelineError::CapabilityMissing {
                media_type: media.media_type.as_str().to_string(),
            });
        }

        let set = self.registry.for_collection(&media.collection_name);
        debug!(
            non_queued = set.non_queued.len(),
            queued = set.queued.len(),
            "conversion set built"
        );

        self.perform_conversions(&set.non_queued, media).await?;

        if !set.queued.is_empty() {
            self.dispatcher
                .enqueue(QueuedConversions {
                    conversions: set.queued,
                    media: media.clone(),
                    queue_name: self.config.queue_name.clone(),
                })
                .await?;
        }

        Ok(())
    }

    /// Runs a batch of conversions synchronously on the invoking task.
    ///
    /// Also the re-entry point for queued conversions: a worker draining
    /// the dispatcher feeds each payload's definitions back in here.
    pub async fn perform_conversions(
        &self,
        conversions: &[ConversionDefinition],
        media: &MediaDescriptor,
    ) -> Result<(), PipelineError> {
        if conversions.is_empty() {
            return Ok(());
        }

        let timer = metrics::RUN_DURATION
            .with_label_values(&[media.media_type.as_str()])
            .start_timer();

        // The guard releases the directory and every intermediate in it on
        // all exit paths, including error propagation via `?`.
        let workdir = WorkingDirectory::allocate(&self.config.temp_dir).await?;

        let original = workdir.random_file(&media.extension);
        self.storage.copy_from_library(media, &original).await?;

        let outcome = match self.stager.stage(media, &workdir, &original).await {
            Ok(outcome) => outcome,
            Err(error) => {
                metrics::PIPELINE_RUNS.with_label_values(&["failed"]).inc();
                return Err(error);
            }
        };

        let renderable = match outcome {
            StagingOutcome::Renderable(path) => path,
            StagingOutcome::Finished => {
                self.finish_without_artifact(conversions, media).await;
                metrics::PIPELINE_RUNS.with_label_values(&["partial"]).inc();
                timer.observe_duration();
                return Ok(());
            }
        };

        for definition in conversions {
            let produced = match self
                .perform_conversion(definition, media, &renderable, &workdir)
                .await
            {
                Ok(path) => path,
                Err(error) => {
                    metrics::PIPELINE_RUNS.with_label_values(&["failed"]).inc();
                    return Err(error);
                }
            };

            let file_name = definition.result_file_name(extension_of(&renderable, media));
            self.storage
                .copy_to_library(&produced, media, true, Some(&file_name))
                .await?;

            self.notifier
                .publish(ConversionCompleted::new(media, definition, true))
                .await;
            metrics::CONVERSIONS_COMPLETED
                .with_label_values(&[media.media_type.as_str()])
                .inc();

            info!(conversion = %definition.name, artifact = %file_name, "conversion persisted");
        }

        metrics::PIPELINE_RUNS
            .with_label_values(&["completed"])
            .inc();
        timer.observe_duration();
        Ok(())
    }

    /// Produces one conversion's artifact in the working directory.
    ///
    /// Copies the renderable to a fresh scratch file so sibling conversions
    /// never observe each other's edits, then applies the manipulation
    /// sequence in declaration order.
    async fn perform_conversion(
        &self,
        definition: &ConversionDefinition,
        media: &MediaDescriptor,
        renderable: &Path,
        workdir: &WorkingDirectory,
    ) -> Result<PathBuf, PipelineError> {
        let scratch = workdir.random_file_labeled(&definition.name, extension_of(renderable, media));
        tokio::fs::copy(renderable, &scratch).await?;

        for manipulation in &definition.manipulations {
            self.transformer
                .apply(manipulation, &scratch)
                .await
                .map_err(|source| PipelineError::ManipulationFailed {
                    conversion: definition.name.clone(),
                    source,
                })?;
        }

        Ok(scratch)
    }

    /// Finishes a run that produced no renderable source.
    ///
    /// Under the default `Attempted` policy consumers still learn that
    /// every requested conversion was processed; under `Produced` nothing
    /// fires.
    async fn finish_without_artifact(
        &self,
        conversions: &[ConversionDefinition],
        media: &MediaDescriptor,
    ) {
        match self.config.completion_policy {
            CompletionPolicy::Attempted => {
                for definition in conversions {
                    self.notifier
                        .publish(ConversionCompleted::new(media, definition, false))
                        .await;
                }
            }
            CompletionPolicy::Produced => {
                warn!(
                    media_id = %media.id,
                    skipped = conversions.len(),
                    "no renderable source, suppressing completion events"
                );
            }
        }
    }
}

/// Extension of the renderable source, falling back to the media's own.
fn extension_of<'a>(path: &'a Path, media: &'a MediaDescriptor) -> &'a str {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or(&media.extension)
}
