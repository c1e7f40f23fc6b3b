//! Application state shared across all handlers.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use publisher_core::config::AppConfig;
use publisher_service::PublishService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Publish orchestration
    pub publish_service: Arc<PublishService>,
    /// When the state was built
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create a new state
    pub fn new(config: Arc<AppConfig>, publish_service: Arc<PublishService>) -> Self {
        Self {
            config,
            publish_service,
            started_at: Utc::now(),
        }
    }
}
