//! In-memory publishing backend configuration.

use serde::{Deserialize, Serialize};

/// Settings for the bundled in-memory backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Instance name embedded in every job handle.
    #[serde(default = "default_instance")]
    pub instance: String,
    /// Store that holds authored content.
    #[serde(default = "default_source_store")]
    pub source_store: String,
    /// Publishing target stores.
    #[serde(default = "default_targets")]
    pub targets: Vec<String>,
    /// Languages the source store has content in.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    /// Item paths seeded into the source store at startup.
    #[serde(default = "default_items")]
    pub items: Vec<String>,
    /// Time a job spends in each of the queued and running states.
    #[serde(default = "default_step_delay")]
    pub step_delay_ms: u64,
    /// How long a finished job's status stays queryable.
    #[serde(default = "default_retention")]
    pub retention_seconds: u64,
    /// How often expired job records are swept.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            instance: default_instance(),
            source_store: default_source_store(),
            targets: default_targets(),
            languages: default_languages(),
            items: default_items(),
            step_delay_ms: default_step_delay(),
            retention_seconds: default_retention(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

fn default_instance() -> String {
    "publisher-01".to_string()
}

fn default_source_store() -> String {
    "master".to_string()
}

fn default_targets() -> Vec<String> {
    vec!["web".to_string(), "experienceedge".to_string()]
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_items() -> Vec<String> {
    vec![
        "/sitecore/content".to_string(),
        "/sitecore/content/home".to_string(),
    ]
}

fn default_step_delay() -> u64 {
    500
}

fn default_retention() -> u64 {
    3600
}

fn default_sweep_interval() -> u64 {
    60
}
