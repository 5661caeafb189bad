//! Configuration for logging

use serde::{Deserialize, Serialize};

fn default_service_name() -> String {
    ontbo_constant::NAME.to_string()
}

fn default_true() -> bool {
    true
}

/// Observability configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Service name reported when logging starts
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Service version (optional)
    #[serde(default)]
    pub service_version: Option<String>,

    /// Enable formatted console output
    #[serde(default = "default_true")]
    pub enable_console: bool,

    /// Filter directive (e.g., "info", "ontbo=debug").
    /// Falls back to `ONTBO_LOG`, then `RUST_LOG`, then "info".
    #[serde(default)]
    pub log_level: Option<String>,

    /// Include the event target in console output
    #[serde(default)]
    pub with_target: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            service_version: None,
            enable_console: true,
            log_level: None,
            with_target: false,
        }
    }
}

impl ObservabilityConfig {
    /// Create a new configuration with service name
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Set service version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = Some(version.into());
        self
    }

    /// Enable or disable console output
    pub fn with_console(mut self, enable: bool) -> Self {
        self.enable_console = enable;
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Show targets in console output
    pub fn with_target(mut self, enable: bool) -> Self {
        self.with_target = enable;
        self
    }

    /// Build from environment variables
    ///
    /// Reads:
    /// - `SERVICE_NAME` → service_name
    /// - `SERVICE_VERSION` → service_version
    /// - `ONTBO_LOG` or `RUST_LOG` → log_level
    pub fn from_env() -> Self {
        let service_name =
            std::env::var("SERVICE_NAME").unwrap_or_else(|_| default_service_name());

        let service_version = std::env::var("SERVICE_VERSION").ok();

        let log_level = std::env::var(ontbo_constant::ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok();

        Self {
            service_name,
            service_version,
            enable_console: true,
            log_level,
            with_target: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let config = ObservabilityConfig::new("svc")
            .with_version("1.2.3")
            .with_log_level("debug")
            .with_console(false)
            .with_target(true);

        assert_eq!(config.service_name, "svc");
        assert_eq!(config.service_version.as_deref(), Some("1.2.3"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert!(!config.enable_console);
        assert!(config.with_target);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: ObservabilityConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ObservabilityConfig::default());
        assert_eq!(config.service_name, "ontbo");
        assert!(config.enable_console);
    }
}
