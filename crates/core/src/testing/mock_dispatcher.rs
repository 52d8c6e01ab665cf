//! Mock job dispatcher for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::jobs::{DispatchError, JobDispatcher, QueuedConversions};

/// [`JobDispatcher`] that records enqueued payloads instead of queueing them.
#[derive(Debug, Default)]
pub struct MockDispatcher {
    jobs: Mutex<Vec<QueuedConversions>>,
    closed: AtomicBool,
}

impl MockDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent enqueue fail as if the queue were gone.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// All enqueued payloads, in dispatch order.
    pub fn jobs(&self) -> Vec<QueuedConversions> {
        self.jobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobDispatcher for MockDispatcher {
    async fn enqueue(&self, job: QueuedConversions) -> Result<(), DispatchError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(DispatchError::QueueClosed);
        }
        self.jobs.lock().unwrap().push(job);
        Ok(())
    }
}
