//! Shared helpers for gateway integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use homebase_gateway::{context::AppContext, routes::create_router, validation::SchemaValidator};
use homebase_store::{
    DocumentStore, Fields, Filter, MemoryStore, Projection, StoreError, StoredDocument,
};
use serde_json::Value;
use tower::ServiceExt;

/// Router over `store` with the built-in schemas.
pub fn router_with(store: Arc<dyn DocumentStore>) -> Router {
    let validator = match SchemaValidator::builtin() {
        Ok(v) => v,
        Err(e) => panic!("builtin schemas must compile: {e}"),
    };
    create_router(AppContext::new(store, Arc::new(validator)))
}

/// Router over a fresh [`MemoryStore`], returned alongside it.
pub fn memory_router() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (router_with(store.clone()), store)
}

/// A decoded response.
pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<&Value>) -> Reply {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    };
    match req {
        Ok(r) => dispatch(app, r).await,
        Err(e) => panic!("failed to build request: {e}"),
    }
}

/// `POST` a urlencoded form body such as `username=alice&password=x`.
pub async fn send_form(app: &Router, uri: &str, form: &'static str) -> Reply {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form));
    match req {
        Ok(r) => dispatch(app, r).await,
        Err(e) => panic!("failed to build request: {e}"),
    }
}

async fn dispatch(app: &Router, req: Request<Body>) -> Reply {
    let target = format!("{} {}", req.method(), req.uri());
    let resp = match app.clone().oneshot(req).await {
        Ok(r) => r,
        Err(e) => panic!("handler error: {e}"),
    };
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = match axum::body::to_bytes(resp.into_body(), 64 * 1024).await {
        Ok(b) => b,
        Err(e) => panic!("failed to read body: {e}"),
    };
    let body = match serde_json::from_slice(&bytes) {
        Ok(v) => v,
        Err(e) => panic!("invalid JSON from {target}: {e}"),
    };
    Reply { status, headers, body }
}

pub async fn all(store: &MemoryStore, collection: &str) -> Vec<StoredDocument> {
    match store.find(collection, &Filter::All, None).await {
        Ok(docs) => docs,
        Err(e) => panic!("find failed: {e}"),
    }
}

/// Which operations of a [`FaultyStore`] fail.
#[derive(Debug, Default, Clone, Copy)]
pub struct Faults {
    pub find_one: bool,
    pub find: bool,
    pub insert_one: bool,
    pub delete_one: bool,
    pub health_check: bool,
}

impl Faults {
    pub fn everything() -> Self {
        Self { find_one: true, find: true, insert_one: true, delete_one: true, health_check: true }
    }
}

/// A [`MemoryStore`] whose selected operations always fail.
pub struct FaultyStore {
    inner: MemoryStore,
    faults: Faults,
}

impl FaultyStore {
    pub fn new(faults: Faults) -> Self {
        Self { inner: MemoryStore::new(), faults }
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

fn unavailable() -> StoreError {
    StoreError::Unavailable { reason: "injected fault".to_owned() }
}

#[async_trait]
impl DocumentStore for FaultyStore {
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<StoredDocument>, StoreError> {
        if self.faults.find_one {
            return Err(unavailable());
        }
        self.inner.find_one(collection, filter).await
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        projection: Option<&Projection>,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        if self.faults.find {
            return Err(unavailable());
        }
        self.inner.find(collection, filter, projection).await
    }

    async fn insert_one(
        &self,
        collection: &str,
        fields: Fields,
    ) -> Result<StoredDocument, StoreError> {
        if self.faults.insert_one {
            return Err(unavailable());
        }
        self.inner.insert_one(collection, fields).await
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        if self.faults.delete_one {
            return Err(unavailable());
        }
        self.inner.delete_one(collection, filter).await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        if self.faults.health_check {
            return Err(unavailable());
        }
        self.inner.health_check().await
    }
}
