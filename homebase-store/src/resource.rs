//! Per-resource accessor over a [`DocumentStore`] collection.
//!
//! Translates the resource vocabulary (natural keys, dual-key lookups,
//! insert timestamps, list projections) into plain store queries.

use homebase_core::{Key, ResourceKind, Timestamps};
use serde_json::Value;

use crate::{DocumentStore, Fields, Filter, Projection, StoreError, StoredDocument, ID_FIELD};

/// Accessor for one resource kind's collection.
#[derive(Clone, Copy)]
pub struct ResourceStore<'a> {
    store: &'a dyn DocumentStore,
    kind: ResourceKind,
}

impl<'a> ResourceStore<'a> {
    /// Bind `kind` to `store`.
    #[must_use]
    pub fn new(store: &'a dyn DocumentStore, kind: ResourceKind) -> Self {
        Self { store, kind }
    }

    /// Find a document by natural key or record id.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the backend.
    pub async fn find_by_key(&self, key: &Key) -> Result<Option<StoredDocument>, StoreError> {
        self.store.find_one(self.kind.collection(), &self.key_filter(key)).await
    }

    /// Find a document whose natural key field equals `value` exactly.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the backend.
    pub async fn find_by_natural_key(
        &self,
        value: &Value,
    ) -> Result<Option<StoredDocument>, StoreError> {
        self.store
            .find_one(self.kind.collection(), &self.natural_key_filter(value))
            .await
    }

    /// List documents projected to `{id, <key field>}`, optionally restricted
    /// to those whose natural key equals `natural_key` exactly, as
    /// [`find_by_natural_key`](Self::find_by_natural_key) matches it.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the backend.
    pub async fn list(
        &self,
        natural_key: Option<&Value>,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let filter = natural_key.map_or(Filter::All, |value| self.natural_key_filter(value));
        let projection = Projection::fields([self.kind.key_field()]);
        self.store
            .find(self.kind.collection(), &filter, Some(&projection))
            .await
    }

    /// Stamp `createdAt` / `lastModified` on `fields` and insert them.
    ///
    /// A client-supplied `id` field is discarded; the store assigns ids.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the backend.
    pub async fn insert(&self, mut fields: Fields) -> Result<StoredDocument, StoreError> {
        if fields.remove(ID_FIELD).is_some() {
            tracing::warn!(resource = %self.kind, "discarding client-supplied id field");
        }
        let stamps = Timestamps::now();
        fields.insert(Timestamps::CREATED_AT.to_owned(), stamps.created_at.into());
        fields.insert(Timestamps::LAST_MODIFIED.to_owned(), stamps.last_modified.into());
        self.store.insert_one(self.kind.collection(), fields).await
    }

    /// Delete the document matched by `key`. Returns `true` if one was removed.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the backend.
    pub async fn delete_by_key(&self, key: &Key) -> Result<bool, StoreError> {
        let deleted = self
            .store
            .delete_one(self.kind.collection(), &self.key_filter(key))
            .await?;
        Ok(deleted > 0)
    }

    fn natural_key_filter(&self, value: &Value) -> Filter {
        Filter::field_eq(self.kind.key_field(), value.clone())
    }

    /// A record-id key still matches a natural key spelled the same way.
    fn key_filter(&self, key: &Key) -> Filter {
        let by_natural = self.natural_key_filter(&Value::String(key.as_natural()));
        match key {
            Key::Record(id) => Filter::Or(vec![by_natural, Filter::Id(*id)]),
            _ => by_natural,
        }
    }
}
