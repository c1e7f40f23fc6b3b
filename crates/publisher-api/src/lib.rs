//! # publisher-api
//!
//! HTTP API layer for Publisher built on Axum.
//!
//! Exposes the publish operations as `GET` endpoints under `/api/publish`,
//! plus a liveness probe. Every publish endpoint answers with HTTP 200 and a
//! `{success, log}` envelope, whatever happened.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
