//! Ontbo observability: logging setup and request-span helpers for the SDK.
//!
//! The SDK itself only emits `tracing` events and spans. Applications that
//! want to see them install a subscriber once at startup:
//!
//! ```no_run
//! use ontbo_observability::{init, ObservabilityConfig};
//!
//! let config = ObservabilityConfig::new("my-service").with_log_level("ontbo=debug");
//! init(config)?;
//!
//! // Or read ONTBO_LOG / RUST_LOG
//! ontbo_observability::init_from_env()?;
//! # Ok::<(), ontbo_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `SERVICE_NAME` - Service name attached to the startup event
//! - `ONTBO_LOG` or `RUST_LOG` - Log level filter

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracing;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use telemetry::{init, init_for_tests, init_from_env};
pub use tracing::{record_duration, record_error, record_status};
