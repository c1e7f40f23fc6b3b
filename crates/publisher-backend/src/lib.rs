//! Publishing backends for Publisher.
//!
//! The production content-management system is an external service; this
//! crate provides an in-process stand-in that implements the same
//! [`PublishingBackend`](publisher_core::traits::PublishingBackend) contract:
//! - content stores with revisioned items and per-language published copies
//! - a job table that moves jobs through `Queued → Running → Finished`
//! - a retention window after which finished jobs are forgotten

pub mod memory;

pub use memory::MemoryBackend;
