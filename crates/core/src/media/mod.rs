//! Media data model.
//!
//! A [`MediaDescriptor`] carries the immutable facts about one uploaded media
//! item that the pipeline reads: identity, type, extension and the collection
//! it belongs to. Descriptors are owned by the caller and never mutated
//! during a run.

mod types;

pub use types::{MediaDescriptor, MediaType};
