//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field has a default so a missing file still yields
//! a runnable configuration.

pub mod app;
pub mod backend;
pub mod logging;
pub mod publishing;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::backend::BackendConfig;
pub use self::logging::LoggingConfig;
pub use self::publishing::PublishingConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Request defaults and wait behaviour.
    #[serde(default)]
    pub publishing: PublishingConfig,
    /// In-memory publishing backend settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` with an environment-specific overlay
    /// and environment variables prefixed with `PUBLISHER__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("PUBLISHER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the services cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.publishing.default_poll_interval_ms == 0 {
            return Err(AppError::configuration(
                "publishing.default_poll_interval_ms must be greater than zero",
            ));
        }
        if self.publishing.current_language.trim().is_empty() {
            return Err(AppError::configuration(
                "publishing.current_language must not be empty",
            ));
        }
        if self.backend.sweep_interval_seconds == 0 {
            return Err(AppError::configuration(
                "backend.sweep_interval_seconds must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.publishing.default_target, "web");
        assert_eq!(config.publishing.edge_target, "experienceedge");
        assert_eq!(config.publishing.default_poll_interval_ms, 1000);
        assert!(config.publishing.wait_timeout_seconds.is_none());
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let mut config = AppConfig::default();
        config.publishing.default_poll_interval_ms = 0;
        let err = config.validate().expect_err("should reject");
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_sections_default_when_missing() {
        let config: AppConfig =
            serde_json::from_str(r#"{"server": {"port": 9000}}"#).expect("deserialize");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.backend.source_store, "master");
    }
}
