//! Mock image transformer for testing.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Mutex;

use crate::conversion::Manipulation;
use crate::transform::{ImageTransformer, TransformError};

/// Mock implementation of the [`ImageTransformer`] trait.
///
/// Records every applied manipulation in order, never touching image bytes.
/// Can be told to fail on a specific manipulation kind to exercise the
/// fatal manipulation path.
#[derive(Debug, Default)]
pub struct MockTransformer {
    applied: Mutex<Vec<Manipulation>>,
    fail_on_blur: Mutex<bool>,
}

impl MockTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes any `Blur` manipulation fail.
    pub fn fail_on_blur(&self) {
        *self.fail_on_blur.lock().unwrap() = true;
    }

    /// All manipulations applied so far, across all conversions, in order.
    pub fn applied(&self) -> Vec<Manipulation> {
        self.applied.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageTransformer for MockTransformer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn apply(&self, manipulation: &Manipulation, path: &Path) -> Result<(), TransformError> {
        if *self.fail_on_blur.lock().unwrap() {
            if let Manipulation::Blur(_) = manipulation {
                return Err(TransformError::InvalidManipulation {
                    reason: format!("forced blur failure at {}", path.display()),
                });
            }
        }
        self.applied.lock().unwrap().push(manipulation.clone());
        Ok(())
    }
}
