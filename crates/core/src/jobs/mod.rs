//! Deferred conversion jobs.
//!
//! Queued conversions leave the synchronous path through the
//! [`JobDispatcher`] seam. The dispatch is fire-and-forget; an external
//! worker later re-enters `perform_conversions` with the queued subset,
//! preserving identical per-type staging and fan-out semantics. There is no
//! idempotence guard: a re-delivered job redoes staging and re-copies
//! artifacts (storage overwrites are idempotent) but re-publishes events,
//! which downstream consumers must tolerate.

mod types;

pub use types::{ChannelDispatcher, DispatchError, JobDispatcher, QueuedConversions};
