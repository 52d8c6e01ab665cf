//! Trait definitions for the transform module.

use async_trait::async_trait;
use std::path::Path;

use crate::conversion::Manipulation;

use super::error::TransformError;

/// An engine that applies one manipulation to an image file in place.
///
/// A `Format` manipulation re-encodes the bytes at the same path; the
/// pipeline renames the file to its final extension after the whole
/// sequence has run.
#[async_trait]
pub trait ImageTransformer: Send + Sync {
    /// Returns the name of this transformer implementation.
    fn name(&self) -> &str;

    /// Applies `manipulation` to the file at `path`, replacing its contents.
    async fn apply(&self, manipulation: &Manipulation, path: &Path) -> Result<(), TransformError>;
}
