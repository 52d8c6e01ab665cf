//! Office-document-to-PDF bridge.
//!
//! Word and PPT staging depends on a shared, out-of-process document
//! conversion service that tolerates exactly one in-flight request at a time
//! system-wide and occasionally returns a near-empty error body with a
//! success status. The bridge wraps that service with the reliability
//! discipline the rest of the pipeline relies on:
//!
//! - output validation: a response under the configured minimum size is a
//!   disguised failure;
//! - bounded retry with fixed backoff over the whole upload;
//! - a process-wide lock acquired (with timeout) around each individual
//!   upload and released on every path, never held across the backoff sleep,
//!   so concurrent media runs interleave instead of starving each other.

mod config;
mod error;
mod office;
mod transport;

pub use config::BridgeConfig;
pub use error::BridgeError;
pub use office::OfficeToPdfBridge;
pub use transport::{BridgeTransport, HttpBridgeTransport};
