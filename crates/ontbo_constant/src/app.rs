//! SDK metadata and defaults

pub const NAME: &str = "ontbo";
pub const DISPLAY_NAME: &str = "Ontbo SDK";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "Typed client for the Ontbo profile/fact/scene knowledge service";

/// Base URL used when `ONTBO_BASE_URL` is not set (local dev server)
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Bearer token for every request (required)
pub const ENV_API_TOKEN: &str = "ONTBO_API_TOKEN";
/// Service base URL
pub const ENV_BASE_URL: &str = "ONTBO_BASE_URL";
/// Transport timeout in whole seconds
pub const ENV_TIMEOUT_SECS: &str = "ONTBO_TIMEOUT_SECS";
/// Log filter, checked before `RUST_LOG`
pub const ENV_LOG: &str = "ONTBO_LOG";

/// Profile update is in progress
pub const STATUS_WORKING: &str = "WORKING";
/// No profile update is running
pub const STATUS_IDLE: &str = "IDLE";
