//! Image manipulation engine seam.
//!
//! The pipeline applies each conversion's manipulation sequence through the
//! [`ImageTransformer`] trait, one step at a time, transforming the file in
//! place. [`ImageEngine`] is the built-in implementation backed by the
//! `image` crate; any error surfaces as `ManipulationFailed` in the
//! pipeline's taxonomy.

mod engine;
mod error;
mod traits;

pub use engine::ImageEngine;
pub use error::TransformError;
pub use traits::ImageTransformer;
