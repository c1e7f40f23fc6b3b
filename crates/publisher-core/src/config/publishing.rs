//! Publish request defaults.
//!
//! The HTTP layer fills missing request parameters (source store, language,
//! target, poll interval) from here. Nothing below it reads configuration.

use serde::{Deserialize, Serialize};

/// Defaults applied at the request boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishingConfig {
    /// Store every publish reads from.
    #[serde(default = "default_source_store")]
    pub source_store: String,
    /// Language used when a request does not name one.
    #[serde(default = "default_language")]
    pub current_language: String,
    /// Target for site and item publishes.
    #[serde(default = "default_target")]
    pub default_target: String,
    /// Target for edge publishes and catalog-wide republishes.
    #[serde(default = "default_edge_target")]
    pub edge_target: String,
    /// Poll interval used when a waiting request does not give one.
    #[serde(default = "default_poll_interval")]
    pub default_poll_interval_ms: u64,
    /// Upper bound on a synchronous wait. `None` waits until the job finishes.
    #[serde(default)]
    pub wait_timeout_seconds: Option<u64>,
}

impl Default for PublishingConfig {
    fn default() -> Self {
        Self {
            source_store: default_source_store(),
            current_language: default_language(),
            default_target: default_target(),
            edge_target: default_edge_target(),
            default_poll_interval_ms: default_poll_interval(),
            wait_timeout_seconds: None,
        }
    }
}

fn default_source_store() -> String {
    "master".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_target() -> String {
    "web".to_string()
}

fn default_edge_target() -> String {
    "experienceedge".to_string()
}

fn default_poll_interval() -> u64 {
    1000
}
