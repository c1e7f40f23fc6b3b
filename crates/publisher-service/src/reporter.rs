//! Status reporter: reads a job's status from a caller-supplied token.
//!
//! Lookups never fail the call. [`StatusLookup`] keeps the three outcomes
//! apart internally; [`JobStatusReport`] renders them into the flat string
//! fields existing clients parse:
//!
//! | Lookup            | state       | result        | processed | messages |
//! |-------------------|-------------|---------------|-----------|----------|
//! | malformed token   | `null`      | `null`        | `null`    | `null`   |
//! | unknown job       | `Exception` | handle string | `null`    | `null`   |
//! | found             | state name  | `True`/`False`| count     | `;`-joined |

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use publisher_core::traits::{BackendError, PublishingBackend};
use publisher_core::types::{JobHandle, JobStatus};

const NULL: &str = "null";
const EXCEPTION: &str = "Exception";
const MESSAGE_SEPARATOR: &str = ";";

/// Outcome of one status lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLookup {
    /// The backend returned a status.
    Found(JobStatus),
    /// The token parsed, but the backend has no record of the job.
    NotFound(JobHandle),
    /// The token did not parse as a handle.
    MalformedHandle,
}

/// Flat, string-valued status report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatusReport {
    /// Job state name, or a sentinel.
    pub state: String,
    /// Failure flag, or the handle when the job is unknown.
    pub result: String,
    /// Processed item count.
    pub processed: String,
    /// Messages joined with `;`.
    pub messages: String,
}

impl From<&StatusLookup> for JobStatusReport {
    fn from(lookup: &StatusLookup) -> Self {
        match lookup {
            StatusLookup::Found(status) => Self {
                state: status.state.to_string(),
                result: if status.failed { "True" } else { "False" }.to_string(),
                processed: status.processed.to_string(),
                messages: status.messages.join(MESSAGE_SEPARATOR),
            },
            StatusLookup::NotFound(handle) => Self {
                state: EXCEPTION.to_string(),
                result: handle.to_string(),
                processed: NULL.to_string(),
                messages: NULL.to_string(),
            },
            StatusLookup::MalformedHandle => Self {
                state: NULL.to_string(),
                result: NULL.to_string(),
                processed: NULL.to_string(),
                messages: NULL.to_string(),
            },
        }
    }
}

/// Answers status queries for job handles.
#[derive(Debug, Clone)]
pub struct StatusReporter {
    /// Publishing backend
    backend: Arc<dyn PublishingBackend>,
}

impl StatusReporter {
    /// Create a new reporter
    pub fn new(backend: Arc<dyn PublishingBackend>) -> Self {
        Self { backend }
    }

    /// Parse `token` and make a single status lookup.
    pub async fn lookup(&self, token: &str) -> StatusLookup {
        let handle = match token.parse::<JobHandle>() {
            Ok(handle) => handle,
            Err(e) => {
                debug!(token, error = %e, "Malformed job handle");
                return StatusLookup::MalformedHandle;
            }
        };

        match self.backend.status(&handle).await {
            Ok(status) => StatusLookup::Found(status),
            Err(BackendError::JobNotFound(_)) => {
                debug!(handle = %handle, "No status record for job");
                StatusLookup::NotFound(handle)
            }
            Err(e) => {
                warn!(handle = %handle, error = %e, "Status lookup failed");
                StatusLookup::NotFound(handle)
            }
        }
    }

    /// Look up `token` and render the result.
    pub async fn report(&self, token: &str) -> JobStatusReport {
        JobStatusReport::from(&self.lookup(token).await)
    }
}
