//! Job state and status snapshot types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a backend job.
///
/// Backends may report states this enum does not know about; those are
/// kept verbatim in [`JobState::Other`] and treated as non-terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobState {
    /// Accepted, not yet picked up.
    Queued,
    /// Being processed.
    Running,
    /// Done, whether it succeeded or not.
    Finished,
    /// A state name the backend added.
    Other(String),
}

impl JobState {
    /// Only `Finished` ends a wait.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished)
    }

    /// Return the state name as the backend spells it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "Queued",
            Self::Running => "Running",
            Self::Finished => "Finished",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for JobState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Queued" => Self::Queued,
            "Running" => Self::Running,
            "Finished" => Self::Finished,
            _ => Self::Other(value),
        }
    }
}

impl From<JobState> for String {
    fn from(state: JobState) -> String {
        match state {
            JobState::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// Point-in-time snapshot of a job, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    /// Current lifecycle state.
    pub state: JobState,
    /// Whether the job reported a failure.
    pub failed: bool,
    /// Number of items processed so far.
    pub processed: u64,
    /// Messages emitted by the job, oldest first.
    pub messages: Vec<String>,
}

impl JobStatus {
    /// A freshly accepted job.
    pub fn queued() -> Self {
        Self {
            state: JobState::Queued,
            failed: false,
            processed: 0,
            messages: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_finished_is_terminal() {
        assert!(JobState::Finished.is_terminal());
        assert!(!JobState::Queued.is_terminal());
        assert!(!JobState::Running.is_terminal());
        assert!(!JobState::Other("Initializing".to_string()).is_terminal());
    }

    #[test]
    fn test_unknown_state_round_trips_verbatim() {
        let state = JobState::from("Initializing".to_string());
        assert_eq!(state, JobState::Other("Initializing".to_string()));
        assert_eq!(state.to_string(), "Initializing");
    }

    #[test]
    fn test_state_serializes_as_name() {
        let json = serde_json::to_string(&JobState::Finished).expect("serialize");
        assert_eq!(json, "\"Finished\"");
    }
}
