//! Typed async client for the Ontbo profile, fact and scene service.
//!
//! A profile accumulates facts (discrete pieces of knowledge) and scenes
//! (ordered conversations). Each service endpoint maps to one async method;
//! every call is a single request with `Authorization: Bearer <token>`.
//!
//! # Errors
//!
//! A non-2xx status comes back as [`OntboError::Api`] with the full response
//! body. Nothing is retried.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ontbo::{AddTextOptions, OntboClient, QueryType, SceneMessage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OntboClient::from_env()?;
//!
//!     let profile = client.create_profile(Some("alice")).await?;
//!     let scene = client.create_scene(&profile.id, None).await?;
//!
//!     let messages = vec![
//!         SceneMessage::user("I just moved to Lyon", 1_700_000_000.0),
//!         SceneMessage::assistant("How do you like it?", 1_700_000_005.0),
//!     ];
//!     let options = AddTextOptions::new().update_now(true).wait_for_result(true);
//!     client
//!         .add_text_to_scene(&profile.id, &scene.id, &messages, options)
//!         .await?;
//!
//!     let answer = client
//!         .query_facts(&profile.id, "Where does the user live?", Some(QueryType::MultiHop))
//!         .await?;
//!     println!("{}", answer.result);
//!     Ok(())
//! }
//! ```
//!
//! Code under test can take `Arc<dyn OntboApi>` and receive an
//! [`InMemoryClient`] instead.

pub mod api;
pub mod client;
pub mod config;
mod context;
pub mod error;
mod facts;
pub mod memory;
mod profiles;
mod scenes;
pub mod types;

// Re-export main types at crate root
pub use api::OntboApi;
pub use client::OntboClient;
pub use config::OntboConfig;
pub use error::{OntboError, Result};
pub use memory::{InMemoryClient, RecordedCall};
pub use types::{
    AddTextOptions, ContextResponse, Fact, ListFactsOptions, Profile, QueryResponse, QueryType,
    ResponseWithId, SceneMessage, UpdateStatus,
};
