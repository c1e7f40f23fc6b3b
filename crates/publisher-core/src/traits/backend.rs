//! Publishing backend abstraction.
//!
//! The content-management system owns stores, items, language catalogs and
//! the job queue. Publisher only needs the handful of calls below: enough to
//! validate a request, submit it as one job, and read that job's status back.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::handle::JobHandle;
use crate::types::request::{ItemRef, PublishJob, StoreRef};
use crate::types::status::JobStatus;

/// Errors raised by a publishing backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// No store with this name.
    #[error("no such store: {0}")]
    StoreNotFound(String),
    /// No item at this path in the store.
    #[error("no such item at path {path} in store {store}")]
    ItemNotFound {
        /// Store that was searched.
        store: String,
        /// Path that did not resolve.
        path: String,
    },
    /// The backend holds no record for this job, or has evicted it.
    #[error("no status record for job {0}")]
    JobNotFound(JobHandle),
    /// The backend could not be reached or failed internally.
    #[error("publishing backend unavailable: {0}")]
    Unavailable(String),
}

/// The external publishing service.
///
/// Implementations must be safe to call concurrently; status lookups are
/// read-only and may be issued for the same handle from many tasks.
#[async_trait]
pub trait PublishingBackend: Send + Sync + std::fmt::Debug {
    /// Look up a store by name.
    async fn resolve_store(&self, name: &str) -> Result<StoreRef, BackendError>;

    /// Look up an item by path within a store.
    async fn resolve_item(&self, store: &StoreRef, path: &str) -> Result<ItemRef, BackendError>;

    /// Every language the store has content in.
    async fn languages(&self, store: &StoreRef) -> Result<Vec<String>, BackendError>;

    /// Names of the publishing targets configured for a source store.
    async fn publishing_targets(&self, store: &StoreRef) -> Result<Vec<String>, BackendError>;

    /// Accept a publish job. The job may not have started when this returns.
    async fn submit(&self, job: PublishJob) -> Result<JobHandle, BackendError>;

    /// Current status of a job.
    async fn status(&self, handle: &JobHandle) -> Result<JobStatus, BackendError>;
}
