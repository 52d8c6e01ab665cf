//! Types for the jobs module.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

use crate::conversion::ConversionDefinition;
use crate::media::MediaDescriptor;

/// Payload handed to the queue: the queued subset of a conversion set plus
/// the media reference it applies to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueuedConversions {
    /// The deferred conversion definitions, in declaration order.
    pub conversions: Vec<ConversionDefinition>,
    /// The media item to derive from.
    pub media: MediaDescriptor,
    /// Optional queue name override from configuration.
    pub queue_name: Option<String>,
}

/// Errors that can occur when handing a job to the queue.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The receiving side of the queue is gone.
    #[error("job queue closed")]
    QueueClosed,
}

/// Asynchronous job queue seam, fire-and-forget.
#[async_trait]
pub trait JobDispatcher: Send + Sync {
    /// Enqueues the job for later execution on a worker.
    async fn enqueue(&self, job: QueuedConversions) -> Result<(), DispatchError>;
}

/// Dispatcher backed by an in-process tokio channel.
///
/// An embedding application drains the receiving end on a worker task and
/// feeds each payload back into
/// [`DerivedFileOrchestrator::perform_conversions`](crate::pipeline::DerivedFileOrchestrator::perform_conversions).
#[derive(Debug, Clone)]
pub struct ChannelDispatcher {
    sender: mpsc::UnboundedSender<QueuedConversions>,
}

impl ChannelDispatcher {
    /// Creates a dispatcher and the receiver to drain on a worker.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<QueuedConversions>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl JobDispatcher for ChannelDispatcher {
    async fn enqueue(&self, job: QueuedConversions) -> Result<(), DispatchError> {
        debug!(
            media_id = %job.media.id,
            conversions = job.conversions.len(),
            queue = job.queue_name.as_deref().unwrap_or("default"),
            "enqueueing deferred conversions"
        );
        self.sender
            .send(job)
            .map_err(|_| DispatchError::QueueClosed)
    }
}
