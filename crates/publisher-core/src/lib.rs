//! # publisher-core
//!
//! Core crate for Publisher. Contains the job handle and status types,
//! the publish request model, the [`PublishingBackend`](traits::PublishingBackend)
//! trait, configuration schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Publisher crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
