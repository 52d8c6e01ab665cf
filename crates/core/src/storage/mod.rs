//! Storage of original and derived media bytes.
//!
//! The pipeline never owns durable storage; it pulls the original file into
//! a working directory and pushes derived artifacts back through the
//! [`Storage`] trait. [`FsStorage`] is a plain local-directory
//! implementation suitable for single-node deployments and tests.

mod error;
mod fs;
mod traits;

pub use error::StorageError;
pub use fs::FsStorage;
pub use traits::Storage;
