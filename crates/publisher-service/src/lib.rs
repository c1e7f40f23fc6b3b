//! # publisher-service
//!
//! Orchestration layer for Publisher: starting publish jobs, waiting for
//! them, and reporting their status.
//!
//! Services follow constructor injection: every service holds the
//! publishing backend as an `Arc<dyn PublishingBackend>` and keeps no other
//! shared state.

pub mod launcher;
pub mod publish;
pub mod reporter;
pub mod waiter;

#[cfg(test)]
pub(crate) mod mock;

pub use launcher::JobLauncher;
pub use publish::{Completion, PublishResponse, PublishService, ReportResponse};
pub use reporter::{JobStatusReport, StatusLookup, StatusReporter};
pub use waiter::{JobWaiter, WaitOptions, WaitOutcome};
