//! In-process document store.
//!
//! Keeps every collection as an insertion-ordered `Vec` behind a single
//! `RwLock`. Nothing is persisted; tests and throwaway demos use it.

use std::{
    collections::HashMap,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use async_trait::async_trait;
use homebase_core::RecordId;

use crate::{DocumentStore, Fields, Filter, Projection, StoreError, StoredDocument, ID_FIELD};

type Collections = HashMap<String, Vec<StoredDocument>>;

/// Thread-safe in-memory [`DocumentStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`.
    ///
    /// # Errors
    /// Returns [`StoreError::LockPoisoned`] if a writer panicked.
    pub fn count(&self, collection: &str) -> Result<usize, StoreError> {
        Ok(self.read(collection)?.get(collection).map_or(0, Vec::len))
    }

    fn read(&self, collection: &str) -> Result<RwLockReadGuard<'_, Collections>, StoreError> {
        self.collections
            .read()
            .map_err(|_| StoreError::LockPoisoned { collection: collection.to_owned() })
    }

    fn write(&self, collection: &str) -> Result<RwLockWriteGuard<'_, Collections>, StoreError> {
        self.collections
            .write()
            .map_err(|_| StoreError::LockPoisoned { collection: collection.to_owned() })
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let guard = self.read(collection)?;
        Ok(guard
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)))
            .cloned())
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        projection: Option<&Projection>,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let guard = self.read(collection)?;
        let Some(docs) = guard.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(docs
            .iter()
            .filter(|d| filter.matches(d))
            .map(|d| projection.map_or_else(|| d.clone(), |p| p.apply(d)))
            .collect())
    }

    async fn insert_one(
        &self,
        collection: &str,
        fields: Fields,
    ) -> Result<StoredDocument, StoreError> {
        if fields.contains_key(ID_FIELD) {
            return Err(StoreError::InvalidDocument {
                collection: collection.to_owned(),
                reason: format!("field '{ID_FIELD}' is assigned by the store"),
            });
        }
        let doc = StoredDocument::new(RecordId::new(), fields);
        self.write(collection)?
            .entry(collection.to_owned())
            .or_default()
            .push(doc.clone());
        tracing::debug!(collection, id = %doc.id, "document inserted");
        Ok(doc)
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let mut guard = self.write(collection)?;
        let Some(docs) = guard.get_mut(collection) else {
            return Ok(0);
        };
        match docs.iter().position(|d| filter.matches(d)) {
            Some(index) => {
                let removed = docs.remove(index);
                tracing::debug!(collection, id = %removed.id, "document deleted");
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.read("*").map(|_| ())
    }
}
