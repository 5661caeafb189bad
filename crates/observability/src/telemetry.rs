//! Subscriber installation.
//!
//! Composes an `EnvFilter` with an optional fmt layer on a `Registry`.
//! Installation happens at most once per process.

use once_cell::sync::OnceCell;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::ObservabilityConfig;
use crate::error::ObservabilityError;

static INSTALLED: OnceCell<()> = OnceCell::new();

fn build_filter(config: &ObservabilityConfig) -> Result<EnvFilter, ObservabilityError> {
    match &config.log_level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|e| ObservabilityError::Config(format!("invalid log filter '{}': {}", level, e))),
        None => Ok(EnvFilter::try_from_env(ontbo_constant::ENV_LOG)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("info"))),
    }
}

/// Install the global subscriber described by `config`.
///
/// Calling this again after a successful install is a no-op.
pub fn init(config: ObservabilityConfig) -> Result<(), ObservabilityError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let env_filter = build_filter(&config)?;

    let fmt_layer = config
        .enable_console
        .then(|| tracing_subscriber::fmt::layer().with_target(config.with_target));

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ObservabilityError::InitFailed(e.to_string()))?;

    let _ = INSTALLED.set(());

    tracing::info!(
        service.name = %config.service_name,
        service.version = config.service_version.as_deref().unwrap_or("unknown"),
        "Tracing initialized"
    );

    Ok(())
}

/// Initialize with configuration from environment variables
pub fn init_from_env() -> Result<(), ObservabilityError> {
    init(ObservabilityConfig::from_env())
}

/// Install a subscriber that writes through the test harness capture.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_for_tests() {
    INSTALLED.get_or_init(|| {
        let filter = EnvFilter::try_from_env(ontbo_constant::ENV_LOG)
            .unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_is_config_error() {
        let config = ObservabilityConfig::new("svc").with_log_level("ontbo=loudest");
        let err = build_filter(&config).unwrap_err();
        assert!(matches!(err, ObservabilityError::Config(_)));
    }

    #[test]
    fn test_init_for_tests_is_idempotent() {
        init_for_tests();
        init_for_tests();
        assert!(init(ObservabilityConfig::default()).is_ok());
    }
}
