//! Shared constants for the Ontbo SDK.

pub mod app;
pub mod wire;

pub use app::*;
