//! Mock bridge transport for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::bridge::{BridgeError, BridgeTransport};

/// Mock implementation of the bridge transport.
///
/// Returns a scripted sequence of response bodies, one per upload, so tests
/// control exactly which attempts the bridge treats as valid PDFs. Uploads
/// beyond the script fail as unreachable.
pub struct MockBridgeTransport {
    responses: Mutex<VecDeque<Vec<u8>>>,
    uploads: AtomicUsize,
}

impl MockBridgeTransport {
    /// Creates a transport that replies with `responses` in order.
    pub fn with_responses(responses: Vec<Vec<u8>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            uploads: AtomicUsize::new(0),
        }
    }

    /// How many uploads were attempted.
    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BridgeTransport for MockBridgeTransport {
    async fn upload(&self, document: &Path) -> Result<Vec<u8>, BridgeError> {
        self.uploads.fetch_add(1, Ordering::SeqCst);

        if !document.exists() {
            return Err(BridgeError::InputNotFound {
                path: document.to_path_buf(),
            });
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| BridgeError::unreachable("scripted responses exhausted"))
    }
}
