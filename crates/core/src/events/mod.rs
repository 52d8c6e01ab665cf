//! Completion events published by the pipeline.
//!
//! A [`ConversionCompleted`] event fires synchronously right after each
//! conversion's artifact is persisted. For audio media and videos whose
//! thumbnail frame could not be grabbed, the reference contract still fires
//! one event per requested conversion even though no image artifact exists;
//! [`CompletionPolicy`] makes that behavior explicit and overridable.

mod types;

pub use types::{CompletionPolicy, ConversionCompleted, EventNotifier};
