//! Core traits defined in `publisher-core` and implemented by other crates.

pub mod backend;

pub use backend::{BackendError, PublishingBackend};
