//! Document storage for the homebase resource API.
//!
//! Provides the [`DocumentStore`] backend trait, the persistent
//! [`SqliteStore`] and in-process [`MemoryStore`] backends, and the
//! per-resource [`ResourceStore`] accessor the HTTP pipeline talks to.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod backend;
pub mod document;
pub mod error;
pub mod memory;
pub mod resource;
pub mod sqlite;

pub use backend::DocumentStore;
pub use document::{Fields, Filter, Projection, StoredDocument, ID_FIELD};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use resource::ResourceStore;
pub use sqlite::SqliteStore;
