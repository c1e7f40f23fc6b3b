//! Job waiter: polls a job until it reaches `Finished`.
//!
//! The loop is Polling → Sleeping → Polling → … → Done, with a fixed sleep
//! between polls. A job that reports `failed` keeps being polled until it
//! is also `Finished`. Callers may bound the wait with a timeout and end it
//! early through a `watch` cancellation channel.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, info, trace};

use publisher_core::error::AppError;
use publisher_core::result::AppResult;
use publisher_core::traits::PublishingBackend;
use publisher_core::types::JobHandle;

/// How a wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitOutcome {
    /// The job reached `Finished`.
    Completed,
    /// The timeout elapsed first.
    TimedOut,
    /// The cancellation signal fired first.
    Cancelled,
}

impl WaitOutcome {
    /// Whether the job was seen to finish.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Poll interval and optional upper bound for one wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Sleep between polls.
    pub poll_interval: Duration,
    /// Give up after this long. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl WaitOptions {
    /// Wait indefinitely, polling every `poll_interval`.
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            timeout: None,
        }
    }

    /// Bound the wait.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Blocks a task until a job finishes.
#[derive(Debug, Clone)]
pub struct JobWaiter {
    /// Publishing backend
    backend: Arc<dyn PublishingBackend>,
}

impl JobWaiter {
    /// Create a new waiter
    pub fn new(backend: Arc<dyn PublishingBackend>) -> Self {
        Self { backend }
    }

    /// Run [`wait_for_completion`](Self::wait_for_completion) on its own task.
    pub fn spawn(
        &self,
        handle: JobHandle,
        options: WaitOptions,
        cancel: watch::Receiver<bool>,
    ) -> JoinHandle<AppResult<WaitOutcome>> {
        let waiter = self.clone();
        tokio::spawn(async move { waiter.wait_for_completion(&handle, options, cancel).await })
    }

    /// Poll `handle` until it is `Finished`, the timeout elapses, or `cancel` flips to `true`.
    ///
    /// The job is always polled at least once. A lookup failure ends the
    /// wait with an error: the job record is gone and will not come back.
    /// The timeout also bounds each status lookup.
    pub async fn wait_for_completion(
        &self,
        handle: &JobHandle,
        options: WaitOptions,
        mut cancel: watch::Receiver<bool>,
    ) -> AppResult<WaitOutcome> {
        if options.poll_interval.is_zero() {
            return Err(AppError::validation("poll interval must be greater than zero"));
        }

        // A timeout too large to represent is no deadline at all.
        let deadline = options
            .timeout
            .and_then(|timeout| Instant::now().checked_add(timeout));
        let mut listening = true;
        let mut polls: u64 = 0;

        debug!(
            handle = %handle,
            poll_interval_ms = options.poll_interval.as_millis() as u64,
            timeout = ?options.timeout,
            "Waiting for publish job"
        );

        loop {
            let poll = self.backend.status(handle);
            let status = match deadline {
                Some(deadline) => match time::timeout_at(deadline, poll).await {
                    Ok(status) => status?,
                    Err(_) => {
                        info!(handle = %handle, polls, "Wait timed out during status lookup");
                        return Ok(WaitOutcome::TimedOut);
                    }
                },
                None => poll.await?,
            };
            polls += 1;

            if status.state.is_terminal() {
                info!(
                    handle = %handle,
                    polls,
                    failed = status.failed,
                    processed = status.processed,
                    "Publish job finished"
                );
                return Ok(WaitOutcome::Completed);
            }

            if listening && *cancel.borrow() {
                info!(handle = %handle, polls, "Wait cancelled");
                return Ok(WaitOutcome::Cancelled);
            }

            trace!(handle = %handle, state = %status.state, polls, "Job not finished yet");

            let sleep = time::sleep(options.poll_interval);
            tokio::pin!(sleep);

            loop {
                tokio::select! {
                    _ = &mut sleep => break,
                    _ = until(deadline) => {
                        info!(handle = %handle, polls, "Wait timed out");
                        return Ok(WaitOutcome::TimedOut);
                    }
                    changed = cancel.changed(), if listening => {
                        match changed {
                            Ok(()) if *cancel.borrow() => {
                                info!(handle = %handle, polls, "Wait cancelled");
                                return Ok(WaitOutcome::Cancelled);
                            }
                            Ok(()) => {}
                            // Sender dropped: nobody can cancel any more.
                            Err(_) => listening = false,
                        }
                    }
                }
            }
        }
    }
}

async fn until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
