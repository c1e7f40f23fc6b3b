//! Publish service. Runs one publish or status operation and records it
//! in a [`RequestResult`] envelope.
//!
//! Failures never escape as errors: validation faults, lost jobs and timed
//! out waits all come back as `success = false` with a log line saying why.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

use publisher_core::traits::PublishingBackend;
use publisher_core::types::{JobHandle, PublishRequest, PublishScope, RequestResult};

use crate::launcher::JobLauncher;
use crate::reporter::{JobStatusReport, StatusReporter};
use crate::waiter::{JobWaiter, WaitOptions, WaitOutcome};

/// What to do once a job has been accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Return the handle immediately.
    Detach,
    /// Wait for the job to finish.
    Wait(WaitOptions),
}

/// Envelope returned by the publish operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishResponse {
    /// Success flag and log.
    #[serde(flatten)]
    pub result: RequestResult,
    /// Handle of the submitted job, if one was submitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    /// How the wait ended, for waiting requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<WaitOutcome>,
}

impl PublishResponse {
    /// Response for a request refused before any job was submitted.
    pub fn rejected(operation: &str, reason: impl fmt::Display) -> Self {
        let mut result = RequestResult::new();
        result.log_info(format!("{operation}: Start"));
        result.log_error(format!("{operation}: {reason}"));
        Self {
            result,
            handle: None,
            outcome: None,
        }
    }
}

/// Envelope returned by the status operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportResponse {
    /// Success flag (always `true`) and log.
    #[serde(flatten)]
    pub result: RequestResult,
    /// Rendered status fields.
    #[serde(flatten)]
    pub report: JobStatusReport,
}

/// Log labels of the publish operations.
pub mod operation {
    /// Smart publish of the whole site.
    pub const PUBLISH_SMART: &str = "PublishSmart";
    /// Republish of the whole site in every language.
    pub const REPUBLISH_ALL_LANGUAGES: &str = "RepublishAllLanguages";
    /// Publish of one item.
    pub const PUBLISH_ITEM: &str = "PublishItem";
    /// Publish of one item to the edge target.
    pub const PUBLISH_EDGE_ITEM: &str = "PublishEdgeItem";
}

/// Log label for the operation that handles `scope`.
pub fn operation_label(scope: &PublishScope) -> &'static str {
    match scope {
        PublishScope::SiteSmart => operation::PUBLISH_SMART,
        PublishScope::SiteRepublishAll => operation::REPUBLISH_ALL_LANGUAGES,
        PublishScope::Item { .. } => operation::PUBLISH_ITEM,
        PublishScope::EdgeItem { .. } => operation::PUBLISH_EDGE_ITEM,
    }
}

/// Aborts the wrapped task when dropped, so a wait ends with its request.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Entry point for the publish operations.
#[derive(Debug, Clone)]
pub struct PublishService {
    launcher: JobLauncher,
    waiter: JobWaiter,
    reporter: StatusReporter,
    /// Flips to `true` on shutdown; ends in-flight waits.
    shutdown: watch::Receiver<bool>,
}

impl PublishService {
    /// Create the service and its launcher, waiter and reporter.
    pub fn new(backend: Arc<dyn PublishingBackend>, shutdown: watch::Receiver<bool>) -> Self {
        Self {
            launcher: JobLauncher::new(Arc::clone(&backend)),
            waiter: JobWaiter::new(Arc::clone(&backend)),
            reporter: StatusReporter::new(backend),
            shutdown,
        }
    }

    /// Submit `request`, then either return its handle or wait for it.
    pub async fn publish(&self, request: PublishRequest, completion: Completion) -> PublishResponse {
        let label = operation_label(&request.scope);
        let handle = match self.launcher.launch(&request).await {
            Ok(handle) => handle,
            Err(e) => return PublishResponse::rejected(label, e.message),
        };

        let mut result = RequestResult::new();
        result.log_info(format!("{label}: Start"));

        let outcome = match completion {
            Completion::Detach => {
                result.success = true;
                result.log_info(format!("Handle: {handle}"));
                result.log_info(format!("{label}: End"));
                if matches!(request.scope, PublishScope::EdgeItem { .. }) {
                    self.log_targets(&mut result, &request.source_store).await;
                }
                None
            }
            Completion::Wait(options) => self.wait(&mut result, label, &handle, options).await,
        };

        PublishResponse {
            result,
            handle: Some(handle.to_string()),
            outcome,
        }
    }

    /// Report the status of the job named by `token`. Always succeeds.
    pub async fn publish_result(&self, token: &str) -> ReportResponse {
        let mut result = RequestResult::new();
        result.log_info("PublishResult: Start");

        let report = self.reporter.report(token).await;

        result.success = true;
        result.log_info(format!("State: {}", report.state));
        result.log_info(format!("Result: {}", report.result));
        result.log_info(format!("Processed: {}", report.processed));
        result.log_info(format!("Messages: {}", report.messages));
        result.log_info("PublishResult: End");

        ReportResponse { result, report }
    }

    async fn wait(
        &self,
        result: &mut RequestResult,
        label: &str,
        handle: &JobHandle,
        options: WaitOptions,
    ) -> Option<WaitOutcome> {
        let mut task = AbortOnDrop(
            self.waiter
                .spawn(handle.clone(), options, self.shutdown.clone()),
        );

        match (&mut task.0).await {
            Ok(Ok(WaitOutcome::Completed)) => {
                result.success = true;
                result.log_info(format!("{label}: Wait"));
                Some(WaitOutcome::Completed)
            }
            Ok(Ok(WaitOutcome::TimedOut)) => {
                result.log_error(format!("{label}: Wait timed out, job {handle} still running"));
                Some(WaitOutcome::TimedOut)
            }
            Ok(Ok(WaitOutcome::Cancelled)) => {
                result.log_error(format!("{label}: Wait cancelled, job {handle} still running"));
                Some(WaitOutcome::Cancelled)
            }
            Ok(Err(e)) => {
                result.log_error(format!("{label}: {}", e.message));
                None
            }
            Err(e) => {
                result.log_error(format!("{label}: wait task failed: {e}"));
                None
            }
        }
    }

    async fn log_targets(&self, result: &mut RequestResult, source_store: &str) {
        match self.launcher.publishing_targets(source_store).await {
            Ok(targets) => result.log_info(format!("Targets: {}", targets.join(", "))),
            Err(e) => warn!(store = source_store, error = %e, "Could not list publishing targets"),
        }
    }
}
