//! Conversion declarations.
//!
//! This module provides the declarative side of the pipeline: which derived
//! renditions exist, for which collections, and whether they run inline or on
//! a queue.
//!
//! # Example
//!
//! ```ignore
//! use mediaforge_core::conversion::{ConversionDefinition, ConversionRegistry, Manipulation};
//!
//! let mut registry = ConversionRegistry::new();
//! registry.register(
//!     ConversionDefinition::new("thumb", "images")
//!         .add(Manipulation::Resize { width: 368, height: 232 })
//!         .add(Manipulation::Quality(90)),
//! );
//! registry.register(
//!     ConversionDefinition::new("detail", "images")
//!         .add(Manipulation::Resize { width: 1600, height: 1000 })
//!         .queued(),
//! );
//!
//! let set = registry.for_collection("images");
//! assert_eq!(set.non_queued.len(), 1);
//! assert_eq!(set.queued.len(), 1);
//! ```

mod set;
mod types;

pub use set::{ConversionRegistry, ConversionSet};
pub use types::{ConversionDefinition, ImageFormat, Manipulation};
