//! Opaque job handles.
//!
//! A [`JobHandle`] identifies one job owned by a publishing backend
//! instance. Its textual form is `<uuid>;<instance>`, which is what callers
//! receive after a launch and what they pass back to query status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Separator between the job id and the owning instance in a handle string.
const SEPARATOR: char = ';';

/// Unique identifier for a backend job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub Uuid);

impl JobId {
    /// Create a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a handle string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandleParseError {
    /// The token was empty or whitespace.
    #[error("handle is empty")]
    Empty,
    /// The token had no `;<instance>` part, or the instance was blank.
    #[error("handle has no instance part")]
    MissingInstance,
    /// The id part was not a UUID.
    #[error("handle id is not a valid UUID: {0}")]
    InvalidId(String),
}

/// Opaque token identifying one backend job.
///
/// Two handles are equal iff they name the same job on the same instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JobHandle {
    id: JobId,
    instance: String,
}

impl JobHandle {
    /// Create a handle for a fresh job owned by `instance`.
    pub fn new(instance: impl Into<String>) -> Self {
        Self::from_parts(JobId::new(), instance)
    }

    /// Build a handle from an existing id and instance.
    pub fn from_parts(id: JobId, instance: impl Into<String>) -> Self {
        Self {
            id,
            instance: instance.into(),
        }
    }

    /// The job identifier.
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Name of the backend instance that owns the job.
    pub fn instance(&self) -> &str {
        &self.instance
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.id, SEPARATOR, self.instance)
    }
}

impl FromStr for JobHandle {
    type Err = HandleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(HandleParseError::Empty);
        }

        let (id, instance) = s
            .split_once(SEPARATOR)
            .ok_or(HandleParseError::MissingInstance)?;
        let instance = instance.trim();
        if instance.is_empty() {
            return Err(HandleParseError::MissingInstance);
        }

        let id = Uuid::parse_str(id.trim())
            .map_err(|e| HandleParseError::InvalidId(e.to_string()))?;

        Ok(Self::from_parts(JobId(id), instance))
    }
}

impl TryFrom<String> for JobHandle {
    type Error = HandleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<JobHandle> for String {
    fn from(handle: JobHandle) -> String {
        handle.to_string()
    }
}
