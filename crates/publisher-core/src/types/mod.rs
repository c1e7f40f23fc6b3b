//! Shared domain types used across Publisher crates.

pub mod handle;
pub mod request;
pub mod response;
pub mod status;

pub use handle::{HandleParseError, JobHandle, JobId};
pub use request::{
    ItemRef, PublishJob, PublishMode, PublishOptions, PublishRequest, PublishScope, StoreRef,
};
pub use response::RequestResult;
pub use status::{JobState, JobStatus};
