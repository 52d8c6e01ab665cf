//! The derived-file generation pipeline.
//!
//! [`DerivedFileOrchestrator`] is the core of the crate. Given a media
//! descriptor it decides which staging conversions must run for the media's
//! type, fans out over the declared conversions, persists each artifact and
//! publishes a completion event per conversion — all on the invoking task,
//! strictly in declaration order. Queued conversions leave through the
//! [`JobDispatcher`](crate::jobs::JobDispatcher) and re-enter the same
//! synchronous path later.
//!
//! Every run owns a randomly named [`WorkingDirectory`] that is released on
//! every exit path — success, fatal error or partial success — via RAII.

mod config;
mod error;
mod orchestrator;
mod staging;
mod workdir;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use orchestrator::DerivedFileOrchestrator;
pub use staging::StagingOutcome;
pub use workdir::WorkingDirectory;
