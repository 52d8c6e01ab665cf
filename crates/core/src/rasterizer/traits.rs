//! Trait definitions for the rasterizer module.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::error::RasterizeError;

/// Renders the first page of a PDF into a raster image.
#[async_trait]
pub trait PdfRasterizer: Send + Sync {
    /// Returns the name of this rasterizer implementation.
    fn name(&self) -> &str;

    /// Whether the rasterization capability is usable at all.
    ///
    /// Checked before any staging work for document media; an unavailable
    /// rasterizer fails the run with `CapabilityMissing`.
    async fn available(&self) -> bool;

    /// Rasterizes the first page of `pdf` and returns the image path.
    ///
    /// The image is written next to the input, same stem, image extension.
    async fn rasterize_first_page(&self, pdf: &Path) -> Result<PathBuf, RasterizeError>;
}
