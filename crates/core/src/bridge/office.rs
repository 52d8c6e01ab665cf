//! Retry and mutual-exclusion wrapper around the conversion service.

use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{timeout, Duration};
use tracing::{debug, warn};

use crate::metrics;
use crate::retry::retry_with_backoff;

use super::config::BridgeConfig;
use super::error::BridgeError;
use super::transport::BridgeTransport;

/// The conversion service tolerates one in-flight request system-wide;
/// every bridge instance in the process serializes on this lock unless a
/// test injects its own.
static SERVICE_LOCK: Lazy<Arc<Mutex<()>>> = Lazy::new(|| Arc::new(Mutex::new(())));

/// Converts office documents to PDF through a flaky shared service.
///
/// Holds the service lock only for the duration of a single upload, not the
/// whole retry loop, so concurrent media runs take turns instead of one run
/// monopolizing the service across its backoff sleeps.
pub struct OfficeToPdfBridge {
    config: BridgeConfig,
    transport: Arc<dyn BridgeTransport>,
    lock: Arc<Mutex<()>>,
}

impl OfficeToPdfBridge {
    /// Creates a bridge over the given transport, sharing the process-wide
    /// service lock.
    pub fn new(config: BridgeConfig, transport: Arc<dyn BridgeTransport>) -> Self {
        Self {
            config,
            transport,
            lock: Arc::clone(&SERVICE_LOCK),
        }
    }

    /// Replaces the service lock. Tests use this to observe lock cycling
    /// without interfering with other tests in the same process.
    pub fn with_lock(mut self, lock: Arc<Mutex<()>>) -> Self {
        self.lock = lock;
        self
    }

    /// Converts `document` to PDF, writing the result to `output`.
    ///
    /// Retries invalid or failed uploads per the configured policy;
    /// exhausting the budget is fatal to the caller's media run.
    pub async fn convert_to_pdf(&self, document: &Path, output: &Path) -> Result<(), BridgeError> {
        let attempts = self.config.retry.max_attempts;

        let pdf = retry_with_backoff(&self.config.retry, BridgeError::is_retryable, |attempt| {
            self.single_upload(document, attempt)
        })
        .await
        .map_err(|last| {
            warn!(document = %document.display(), attempts, %last, "bridge retry budget exhausted");
            metrics::BRIDGE_ATTEMPTS.with_label_values(&["exhausted"]).inc();
            match last {
                // Exhaustion of retryable failures collapses into one fatal error.
                e if e.is_retryable() => BridgeError::AttemptsExhausted { attempts },
                other => other,
            }
        })?;

        tokio::fs::write(output, &pdf).await?;
        debug!(document = %document.display(), bytes = pdf.len(), "document converted to PDF");
        Ok(())
    }

    /// One locked upload: acquire the service lock with timeout, perform the
    /// call, validate the body. The guard drops as soon as the call returns,
    /// success or not.
    async fn single_upload(&self, document: &Path, attempt: u32) -> Result<Vec<u8>, BridgeError> {
        let body = {
            let lock_wait = Duration::from_secs(self.config.lock_timeout_secs);
            let _guard = timeout(lock_wait, self.lock.lock()).await.map_err(|_| {
                BridgeError::LockTimeout {
                    timeout_secs: self.config.lock_timeout_secs,
                }
            })?;
            debug!(attempt, document = %document.display(), "service lock held, uploading");
            self.transport.upload(document).await
        }?;

        if body.len() < self.config.min_valid_bytes {
            metrics::BRIDGE_ATTEMPTS.with_label_values(&["invalid"]).inc();
            return Err(BridgeError::InvalidOutput {
                size: body.len(),
                min: self.config.min_valid_bytes,
            });
        }

        metrics::BRIDGE_ATTEMPTS.with_label_values(&["ok"]).inc();
        Ok(body)
    }
}
