//! The per-request result envelope.

use serde::{Deserialize, Serialize};

/// Accumulates the outcome and log of one orchestration call.
///
/// Every publish operation returns one of these, successful or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Log lines, in the order they were written.
    pub log: Vec<String>,
}

impl RequestResult {
    /// An empty, not-yet-successful result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an informational log line.
    pub fn log_info(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::debug!(line = %line, "request log");
        self.log.push(line);
    }

    /// Append an error log line and mark the result unsuccessful.
    pub fn log_error(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::warn!(line = %line, "request failed");
        self.log.push(line);
        self.success = false;
    }
}
