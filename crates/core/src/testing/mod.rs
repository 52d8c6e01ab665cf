//! Testing utilities and mock implementations for lifecycle tests.
//!
//! This module provides mock implementations of all collaborator traits,
//! allowing full pipeline testing without real storage, image codecs or
//! external converter processes.
//!
//! # Example
//!
//! ```rust,ignore
//! use mediaforge_core::testing::{fixtures, MockStorage};
//!
//! let storage = MockStorage::new();
//! let media = fixtures::image_media("photo", "jpg");
//! storage.seed_original(&media, fixtures::jpeg_bytes());
//!
//! // Run the orchestrator, then inspect what was persisted.
//! let names = storage.persisted_names(&media);
//! ```

mod mock_bridge;
mod mock_dispatcher;
mod mock_notifier;
mod mock_rasterizer;
mod mock_storage;
mod mock_transcoder;
mod mock_transformer;

pub use mock_bridge::MockBridgeTransport;
pub use mock_dispatcher::MockDispatcher;
pub use mock_notifier::RecordingNotifier;
pub use mock_rasterizer::MockRasterizer;
pub use mock_storage::{MockStorage, PersistedArtifact};
pub use mock_transcoder::MockTranscoder;
pub use mock_transformer::MockTransformer;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::media::{MediaDescriptor, MediaType};

    /// Plausible JPEG-framed bytes, small but larger than typical stub output.
    pub fn jpeg_bytes() -> Vec<u8> {
        // Not decodable; the mock transformer never decodes.
        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
        bytes.extend(std::iter::repeat(0xAB).take(256));
        bytes.extend([0xFF, 0xD9]);
        bytes
    }

    /// A media descriptor forced to the given type, in the "default"
    /// collection.
    pub fn media(file_name: &str, extension: &str, media_type: MediaType) -> MediaDescriptor {
        MediaDescriptor::new(file_name, extension, "default").with_type(media_type)
    }

    /// An image media descriptor in the "default" collection.
    pub fn image_media(stem: &str, extension: &str) -> MediaDescriptor {
        MediaDescriptor::new(format!("{stem}.{extension}"), extension, "default")
    }
}
