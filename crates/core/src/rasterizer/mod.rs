//! PDF first-page rasterization.
//!
//! Staging for PDF, Word and PPT media needs a raster image of the
//! document's first page. The capability is probed up front: when the
//! rasterizer is unavailable, the pipeline fails a document media's run with
//! `CapabilityMissing` before any work happens.

mod error;
mod pdftoppm;
mod traits;

pub use error::RasterizeError;
pub use pdftoppm::{PdftoppmRasterizer, RasterizerConfig};
pub use traits::PdfRasterizer;
