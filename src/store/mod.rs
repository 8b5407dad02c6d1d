//! The remote document store, modeled as an actor owning one schemaless
//! collection and reached only through an async client.

pub mod actor;
pub mod client;
pub mod error;

pub use actor::*;
pub use client::*;
pub use error::*;

/// A schemaless storage record: a plain JSON field bag.
pub type Document = serde_json::Map<String, serde_json::Value>;
