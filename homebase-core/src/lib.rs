//! Core types for the homebase resource API.
//!
//! Defines the domain vocabulary shared by the store and the gateway:
//! record identifiers, lookup keys, resource kinds, and insert timestamps.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod id;
pub mod key;
pub mod resource;

pub use error::CoreError;
pub use id::RecordId;
pub use key::Key;
pub use resource::{ResourceKind, Timestamps};
