//! Mock PDF rasterizer for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::rasterizer::{PdfRasterizer, RasterizeError};

/// Mock implementation of the [`PdfRasterizer`] trait.
///
/// Writes a stub image file next to the input, matching the contract of the
/// real pdftoppm wrapper. Availability is switchable to exercise the
/// capability check.
pub struct MockRasterizer {
    available: AtomicBool,
    calls: AtomicUsize,
}

impl Default for MockRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRasterizer {
    /// Creates an available rasterizer.
    pub fn new() -> Self {
        Self {
            available: AtomicBool::new(true),
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates a rasterizer that reports itself as unusable.
    pub fn unavailable() -> Self {
        let rasterizer = Self::new();
        rasterizer.available.store(false, Ordering::SeqCst);
        rasterizer
    }

    /// How many pages were rasterized.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PdfRasterizer for MockRasterizer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn rasterize_first_page(&self, pdf: &Path) -> Result<PathBuf, RasterizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !pdf.exists() {
            return Err(RasterizeError::InputNotFound {
                path: pdf.to_path_buf(),
            });
        }
        let image = pdf.with_extension("jpg");
        tokio::fs::write(&image, b"rasterized page").await?;
        Ok(image)
    }
}
