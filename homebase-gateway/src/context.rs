//! Dependencies shared by every request handler.

use std::sync::Arc;

use homebase_core::ResourceKind;
use homebase_store::{DocumentStore, ResourceStore};

use crate::validation::SchemaValidator;

/// Dependencies handed to the router at startup.
///
/// Cheap to clone; both members are read-only after construction.
#[derive(Clone)]
pub struct AppContext {
    store: Arc<dyn DocumentStore>,
    validator: Arc<SchemaValidator>,
}

impl AppContext {
    /// Bundle a store and a validator.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, validator: Arc<SchemaValidator>) -> Self {
        Self { store, validator }
    }

    /// The underlying document store.
    #[must_use]
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    /// The compiled schema registry.
    #[must_use]
    pub fn validator(&self) -> &SchemaValidator {
        &self.validator
    }

    /// Accessor for `kind`'s collection.
    #[must_use]
    pub fn resources(&self, kind: ResourceKind) -> ResourceStore<'_> {
        ResourceStore::new(self.store(), kind)
    }
}
