//! Derived-file lifecycle integration tests.
//!
//! These tests verify the orchestrator with mock collaborators:
//! - Entry policy (unknown types, missing rasterization capability)
//! - Staging per media type and its persisted side-artifacts
//! - Fan-out order, event order and completion policies
//! - Queued/non-queued partitioning and queue re-entry
//! - Working directory release on every exit path

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::sync::Mutex;

use mediaforge_core::{
    bridge::{BridgeConfig, OfficeToPdfBridge},
    events::CompletionPolicy,
    media::{MediaDescriptor, MediaType},
    pipeline::{DerivedFileOrchestrator, PipelineConfig, PipelineError},
    retry::RetryPolicy,
    testing::{
        fixtures, MockBridgeTransport, MockDispatcher, MockRasterizer, MockStorage,
        MockTranscoder, MockTransformer, RecordingNotifier,
    },
    ConversionDefinition, ConversionRegistry, Manipulation,
};
use mediaforge_core::conversion::ImageFormat;

/// Test helper wiring the orchestrator to mock collaborators.
struct TestHarness {
    orchestrator: DerivedFileOrchestrator,
    storage: Arc<MockStorage>,
    transformer: Arc<MockTransformer>,
    rasterizer: Arc<MockRasterizer>,
    bridge_transport: Arc<MockBridgeTransport>,
    transcoder: Arc<MockTranscoder>,
    notifier: Arc<RecordingNotifier>,
    dispatcher: Arc<MockDispatcher>,
    temp_dir: TempDir,
}

struct HarnessBuilder {
    registry: ConversionRegistry,
    pipeline: PipelineConfig,
    rasterizer_available: bool,
    bridge_responses: Vec<Vec<u8>>,
}

impl HarnessBuilder {
    fn new(registry: ConversionRegistry) -> Self {
        Self {
            registry,
            pipeline: PipelineConfig::default(),
            rasterizer_available: true,
            bridge_responses: vec![vec![1u8; 50 * 1024]],
        }
    }

    fn completion_policy(mut self, policy: CompletionPolicy) -> Self {
        self.pipeline = self.pipeline.with_completion_policy(policy);
        self
    }

    fn queue_name(mut self, name: &str) -> Self {
        self.pipeline = self.pipeline.with_queue_name(name);
        self
    }

    fn rasterizer_unavailable(mut self) -> Self {
        self.rasterizer_available = false;
        self
    }

    fn bridge_responses(mut self, responses: Vec<Vec<u8>>) -> Self {
        self.bridge_responses = responses;
        self
    }

    fn build(self) -> TestHarness {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pipeline = self.pipeline.with_temp_dir(temp_dir.path().join("work"));

        let storage = Arc::new(MockStorage::new());
        let transformer = Arc::new(MockTransformer::new());
        let rasterizer = Arc::new(if self.rasterizer_available {
            MockRasterizer::new()
        } else {
            MockRasterizer::unavailable()
        });
        let bridge_transport = Arc::new(MockBridgeTransport::with_responses(self.bridge_responses));
        let transcoder = Arc::new(MockTranscoder::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let dispatcher = Arc::new(MockDispatcher::new());

        let bridge_config = BridgeConfig::new("http://converter:3000")
            .with_retry(RetryPolicy::fixed(3, Duration::from_millis(1)));
        let bridge = Arc::new(
            OfficeToPdfBridge::new(
                bridge_config,
                Arc::clone(&bridge_transport) as Arc<dyn mediaforge_core::bridge::BridgeTransport>,
            )
            .with_lock(Arc::new(Mutex::new(()))),
        );

        let orchestrator = DerivedFileOrchestrator::new(
            Arc::clone(&storage) as _,
            Arc::clone(&transformer) as _,
            Arc::clone(&rasterizer) as _,
            bridge,
            Arc::clone(&transcoder) as _,
            Arc::clone(&notifier) as _,
            Arc::clone(&dispatcher) as _,
            self.registry,
            pipeline,
        );

        TestHarness {
            orchestrator,
            storage,
            transformer,
            rasterizer,
            bridge_transport,
            transcoder,
            notifier,
            dispatcher,
            temp_dir,
        }
    }
}

impl TestHarness {
    /// Number of leftover entries under the working-directory root.
    fn leftover_workdirs(&self) -> usize {
        let work_root = self.temp_dir.path().join("work");
        if !work_root.exists() {
            return 0;
        }
        std::fs::read_dir(work_root).unwrap().count()
    }

    fn work_root_exists(&self) -> bool {
        self.temp_dir.path().join("work").exists()
    }
}

fn resize(width: u32, height: u32) -> Manipulation {
    Manipulation::Resize { width, height }
}

fn registry_of(definitions: Vec<ConversionDefinition>) -> ConversionRegistry {
    let mut registry = ConversionRegistry::new();
    for definition in definitions {
        registry.register(definition);
    }
    registry
}

fn default_registry() -> ConversionRegistry {
    registry_of(vec![
        ConversionDefinition::new("thumb", "default").add(resize(368, 232)),
        ConversionDefinition::new("card", "default").add(resize(800, 600)),
    ])
}

#[tokio::test]
async fn test_image_run_persists_all_conversions_in_order() {
    let harness = HarnessBuilder::new(default_registry()).build();
    let media = fixtures::image_media("photo", "jpg");
    harness.storage.seed_original(&media, fixtures::jpeg_bytes());

    harness.orchestrator.create_derived_files(&media).await.unwrap();

    assert_eq!(
        harness.storage.persisted_names(&media),
        vec!["thumb.jpg", "card.jpg"]
    );
    assert_eq!(harness.notifier.conversion_names(), vec!["thumb", "card"]);
    assert!(harness.notifier.events().iter().all(|e| e.artifact_produced));
    assert_eq!(harness.leftover_workdirs(), 0);
}

#[tokio::test]
async fn test_event_order_matches_declaration_order() {
    let registry = registry_of(
        ["a", "b", "c", "d"]
            .into_iter()
            .map(|name| ConversionDefinition::new(name, "default").add(resize(10, 10)))
            .collect(),
    );
    let harness = HarnessBuilder::new(registry).build();
    let media = fixtures::image_media("photo", "png");
    harness.storage.seed_original(&media, fixtures::jpeg_bytes());

    harness.orchestrator.create_derived_files(&media).await.unwrap();

    assert_eq!(harness.notifier.conversion_names(), vec!["a", "b", "c", "d"]);
}

#[tokio::test]
async fn test_format_manipulation_renames_artifact() {
    let registry = registry_of(vec![ConversionDefinition::new("thumb", "default")
        .add(resize(100, 100))
        .add(Manipulation::Format(ImageFormat::Png))]);
    let harness = HarnessBuilder::new(registry).build();
    let media = fixtures::image_media("photo", "jpg");
    harness.storage.seed_original(&media, fixtures::jpeg_bytes());

    harness.orchestrator.create_derived_files(&media).await.unwrap();

    assert_eq!(harness.storage.persisted_names(&media), vec!["thumb.png"]);
}

#[tokio::test]
async fn test_manipulations_apply_in_declared_order() {
    let registry = registry_of(vec![ConversionDefinition::new("fancy", "default")
        .add(resize(100, 100))
        .add(Manipulation::Greyscale)
        .add(Manipulation::Quality(60))]);
    let harness = HarnessBuilder::new(registry).build();
    let media = fixtures::image_media("photo", "jpg");
    harness.storage.seed_original(&media, fixtures::jpeg_bytes());

    harness.orchestrator.create_derived_files(&media).await.unwrap();

    assert_eq!(
        harness.transformer.applied(),
        vec![resize(100, 100), Manipulation::Greyscale, Manipulation::Quality(60)]
    );
}

#[tokio::test]
async fn test_unknown_type_is_a_noop() {
    let harness = HarnessBuilder::new(default_registry()).build();
    let media = MediaDescriptor::new("archive.zip", "zip", "default");
    assert_eq!(media.media_type, MediaType::Other);

    harness.orchestrator.create_derived_files(&media).await.unwrap();

    assert!(harness.storage.persisted().is_empty());
    assert!(harness.notifier.events().is_empty());
    assert!(!harness.work_root_exists());
}

#[tokio::test]
async fn test_missing_rasterizer_fails_before_any_work() {
    let harness = HarnessBuilder::new(default_registry())
        .rasterizer_unavailable()
        .build();
    let media = MediaDescriptor::new("report.pdf", "pdf", "default");
    harness.storage.seed_original(&media, b"%PDF-1.4".to_vec());

    let result = harness.orchestrator.create_derived_files(&media).await;

    assert!(matches!(
        result,
        Err(PipelineError::CapabilityMissing { .. })
    ));
    assert!(harness.storage.persisted().is_empty());
    assert!(!harness.work_root_exists(), "no temp dir before the capability check");
}

#[tokio::test]
async fn test_empty_conversion_set_allocates_nothing() {
    let harness = HarnessBuilder::new(ConversionRegistry::new()).build();
    let media = fixtures::image_media("photo", "jpg");
    harness.storage.seed_original(&media, fixtures::jpeg_bytes());

    harness.orchestrator.create_derived_files(&media).await.unwrap();

    assert!(!harness.work_root_exists());
    assert!(harness.notifier.events().is_empty());
}

#[tokio::test]
async fn test_pdf_media_is_rasterized_then_converted() {
    let harness = HarnessBuilder::new(default_registry()).build();
    let media = MediaDescriptor::new("report.pdf", "pdf", "default");
    harness.storage.seed_original(&media, b"%PDF-1.4".to_vec());

    harness.orchestrator.create_derived_files(&media).await.unwrap();

    assert_eq!(harness.rasterizer.call_count(), 1);
    assert_eq!(
        harness.storage.persisted_names(&media),
        vec!["thumb.jpg", "card.jpg"]
    );
}

#[tokio::test]
async fn test_word_media_bridges_then_persists_pdf_side_artifact() {
    let harness = HarnessBuilder::new(default_registry()).build();
    let media = MediaDescriptor::new("report.docx", "docx", "default");
    harness.storage.seed_original(&media, b"word bytes".to_vec());

    harness.orchestrator.create_derived_files(&media).await.unwrap();

    assert_eq!(harness.bridge_transport.upload_count(), 1);
    assert_eq!(harness.rasterizer.call_count(), 1);
    // The intermediate PDF lands in the library before any image artifact.
    assert_eq!(
        harness.storage.persisted_names(&media),
        vec!["thumb.pdf", "thumb.jpg", "card.jpg"]
    );
}

#[tokio::test]
async fn test_word_media_fails_when_bridge_exhausts_retries() {
    // Every scripted body is below the validity threshold.
    let harness = HarnessBuilder::new(default_registry())
        .bridge_responses((0..3).map(|_| vec![0u8; 10]).collect())
        .build();
    let media = MediaDescriptor::new("report.docx", "docx", "default");
    harness.storage.seed_original(&media, b"word bytes".to_vec());

    let result = harness.orchestrator.create_derived_files(&media).await;

    assert!(matches!(result, Err(PipelineError::ConversionFailed { .. })));
    assert_eq!(harness.bridge_transport.upload_count(), 3);
    assert!(harness.storage.persisted().is_empty());
    assert!(harness.notifier.events().is_empty());
    assert_eq!(harness.leftover_workdirs(), 0, "workdir must be released on failure");
}

#[tokio::test]
async fn test_video_media_persists_compressed_video_and_frame_conversions() {
    let harness = HarnessBuilder::new(default_registry()).build();
    let media = MediaDescriptor::new("clip.mkv", "mkv", "default");
    harness.storage.seed_original(&media, b"video bytes".to_vec());

    harness.orchestrator.create_derived_files(&media).await.unwrap();

    assert_eq!(harness.transcoder.video_count(), 1);
    assert_eq!(harness.transcoder.frame_count(), 1);
    assert_eq!(
        harness.storage.persisted_names(&media),
        vec!["thumb.mp4", "thumb.jpg", "card.jpg"]
    );
    assert!(harness.notifier.events().iter().all(|e| e.artifact_produced));
}

#[tokio::test]
async fn test_failed_frame_grab_completes_partially() {
    let harness = HarnessBuilder::new(default_registry()).build();
    harness.transcoder.fail_frame();
    let media = MediaDescriptor::new("clip.mp4", "mp4", "default");
    harness.storage.seed_original(&media, b"video bytes".to_vec());

    harness.orchestrator.create_derived_files(&media).await.unwrap();

    // The compressed video still lands; no image conversions run.
    assert_eq!(harness.storage.persisted_names(&media), vec!["thumb.mp4"]);
    let events = harness.notifier.events();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| !e.artifact_produced));
    assert_eq!(harness.leftover_workdirs(), 0);
}

#[tokio::test]
async fn test_produced_policy_suppresses_artifactless_events() {
    let harness = HarnessBuilder::new(default_registry())
        .completion_policy(CompletionPolicy::Produced)
        .build();
    harness.transcoder.fail_frame();
    let media = MediaDescriptor::new("clip.mp4", "mp4", "default");
    harness.storage.seed_original(&media, b"video bytes".to_vec());

    harness.orchestrator.create_derived_files(&media).await.unwrap();

    assert!(harness.notifier.events().is_empty());
}

#[tokio::test]
async fn test_failed_video_compression_is_fatal() {
    let harness = HarnessBuilder::new(default_registry()).build();
    harness.transcoder.fail_video();
    let media = MediaDescriptor::new("clip.mp4", "mp4", "default");
    harness.storage.seed_original(&media, b"video bytes".to_vec());

    let result = harness.orchestrator.create_derived_files(&media).await;

    assert!(matches!(result, Err(PipelineError::ConversionFailed { .. })));
    assert!(harness.storage.persisted().is_empty());
    assert_eq!(harness.leftover_workdirs(), 0);
}

#[tokio::test]
async fn test_audio_media_persists_compressed_audio_only() {
    let harness = HarnessBuilder::new(default_registry()).build();
    let media = MediaDescriptor::new("song.flac", "flac", "default");
    harness.storage.seed_original(&media, b"audio bytes".to_vec());

    harness.orchestrator.create_derived_files(&media).await.unwrap();

    assert_eq!(harness.transcoder.audio_count(), 1);
    assert_eq!(harness.storage.persisted_names(&media), vec!["thumb.mp3"]);
    let events = harness.notifier.events();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| !e.artifact_produced));
}

#[tokio::test]
async fn test_manipulation_failure_aborts_run_without_events() {
    let registry = registry_of(vec![
        ConversionDefinition::new("blurred", "default").add(Manipulation::Blur(2.0)),
        ConversionDefinition::new("card", "default").add(resize(800, 600)),
    ]);
    let harness = HarnessBuilder::new(registry).build();
    harness.transformer.fail_on_blur();
    let media = fixtures::image_media("photo", "jpg");
    harness.storage.seed_original(&media, fixtures::jpeg_bytes());

    let result = harness.orchestrator.create_derived_files(&media).await;

    assert!(matches!(
        result,
        Err(PipelineError::ManipulationFailed { ref conversion, .. }) if conversion == "blurred"
    ));
    assert!(harness.storage.persisted().is_empty());
    assert!(harness.notifier.events().is_empty());
    assert_eq!(harness.leftover_workdirs(), 0);
}

#[tokio::test]
async fn test_queued_conversions_are_dispatched_not_run() {
    let registry = registry_of(vec![
        ConversionDefinition::new("thumb", "default").add(resize(368, 232)),
        ConversionDefinition::new("detail", "default")
            .add(resize(1920, 1080))
            .queued(),
    ]);
    let harness = HarnessBuilder::new(registry).queue_name("renditions").build();
    let media = fixtures::image_media("photo", "jpg");
    harness.storage.seed_original(&media, fixtures::jpeg_bytes());

    harness.orchestrator.create_derived_files(&media).await.unwrap();

    assert_eq!(harness.storage.persisted_names(&media), vec!["thumb.jpg"]);

    let jobs = harness.dispatcher.jobs();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].conversions.len(), 1);
    assert_eq!(jobs[0].conversions[0].name, "detail");
    assert_eq!(jobs[0].queue_name.as_deref(), Some("renditions"));
}

#[tokio::test]
async fn test_queued_payload_reenters_synchronous_path() {
    let registry = registry_of(vec![ConversionDefinition::new("detail", "default")
        .add(resize(1920, 1080))
        .queued()]);
    let harness = HarnessBuilder::new(registry).build();
    let media = fixtures::image_media("photo", "jpg");
    harness.storage.seed_original(&media, fixtures::jpeg_bytes());

    harness.orchestrator.create_derived_files(&media).await.unwrap();
    assert!(harness.storage.persisted().is_empty());

    // A queue worker replays the payload through the same synchronous path.
    let job = harness.dispatcher.jobs().remove(0);
    harness
        .orchestrator
        .perform_conversions(&job.conversions, &job.media)
        .await
        .unwrap();

    assert_eq!(harness.storage.persisted_names(&media), vec!["detail.jpg"]);
    assert_eq!(harness.notifier.conversion_names(), vec!["detail"]);
}

#[tokio::test]
async fn test_closed_queue_is_an_error() {
    let registry = registry_of(vec![ConversionDefinition::new("detail", "default")
        .add(resize(100, 100))
        .queued()]);
    let harness = HarnessBuilder::new(registry).build();
    harness.dispatcher.close();
    let media = fixtures::image_media("photo", "jpg");
    harness.storage.seed_original(&media, fixtures::jpeg_bytes());

    let result = harness.orchestrator.create_derived_files(&media).await;
    assert!(matches!(result, Err(PipelineError::Dispatch(_))));
}

#[tokio::test]
async fn test_concurrent_runs_do_not_interfere() {
    let harness = Arc::new(HarnessBuilder::new(default_registry()).build());

    let mut handles = Vec::new();
    for i in 0..8 {
        let harness = Arc::clone(&harness);
        let media = fixtures::image_media(&format!("photo-{i}"), "jpg");
        harness.storage.seed_original(&media, fixtures::jpeg_bytes());
        handles.push(tokio::spawn(async move {
            harness.orchestrator.create_derived_files(&media).await.unwrap();
            media
        }));
    }

    for handle in handles {
        let media = handle.await.unwrap();
        assert_eq!(
            harness.storage.persisted_names(&media),
            vec!["thumb.jpg", "card.jpg"]
        );
    }
    assert_eq!(harness.leftover_workdirs(), 0);
}
