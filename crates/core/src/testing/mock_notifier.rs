//! Recording event notifier for testing.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::events::{ConversionCompleted, EventNotifier};

/// [`EventNotifier`] that records every published event in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<ConversionCompleted>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events published so far, in publication order.
    pub fn events(&self) -> Vec<ConversionCompleted> {
        self.events.lock().unwrap().clone()
    }

    /// Conversion names of published events, in publication order.
    pub fn conversion_names(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.conversion_name.clone())
            .collect()
    }
}

#[async_trait]
impl EventNotifier for RecordingNotifier {
    async fn publish(&self, event: ConversionCompleted) {
        self.events.lock().unwrap().push(event);
    }
}
