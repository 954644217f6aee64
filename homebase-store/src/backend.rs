//! Document store abstraction trait.
//!
//! The SQLite and in-memory backends, and any test double, plug in here
//! without changing the resource accessors or the HTTP pipeline.

use async_trait::async_trait;

use crate::{Fields, Filter, Projection, StoreError, StoredDocument};

/// Collection-oriented document database.
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
/// No operation is retried or timed out here; failures surface as-is.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return the first document in `collection` matching `filter`.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the backend cannot be queried.
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<StoredDocument>, StoreError>;

    /// Return every document in `collection` matching `filter`, trimmed by
    /// `projection` when one is given.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the backend cannot be queried.
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        projection: Option<&Projection>,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    /// Insert `fields` as a new document and return it with its assigned id.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the write is rejected.
    async fn insert_one(
        &self,
        collection: &str,
        fields: Fields,
    ) -> Result<StoredDocument, StoreError>;

    /// Delete the first document matching `filter`; returns the number of
    /// documents removed (0 or 1).
    ///
    /// # Errors
    /// Returns [`StoreError`] if the backend cannot be written.
    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;

    /// Check that the backend is reachable.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] when it is not.
    async fn health_check(&self) -> Result<(), StoreError>;
}
