//! Status mapping when the document store fails mid-pipeline.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use common::{router_with, send, Faults, FaultyStore};

fn router(faults: Faults) -> (axum::Router, Arc<FaultyStore>) {
    let store = Arc::new(FaultyStore::new(faults));
    (router_with(store.clone()), store)
}

#[tokio::test]
async fn uniqueness_check_failure_returns_500() {
    let (app, store) = router(Faults { find_one: true, ..Faults::default() });
    let reply = send(&app, "POST", "/users", Some(&json!({"username": "a", "password": "x"}))).await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(reply.body, json!({"status": 500, "message": "Internal Server Error"}));
    assert!(matches!(store.inner().count("users"), Ok(0)), "insert must not run");
}

#[tokio::test]
async fn insert_failure_returns_500() {
    let (app, _store) = router(Faults { insert_one: true, ..Faults::default() });
    let reply = send(&app, "POST", "/devices", Some(&json!({"chipId": "c1"}))).await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(reply.body["status"], 500);
}

#[tokio::test]
async fn schema_failure_short_circuits_before_store() {
    let (app, _store) = router(Faults::everything());
    let reply = send(&app, "POST", "/users", Some(&json!({"username": "a"}))).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST, "validation runs before any store call");
}

#[tokio::test]
async fn list_failure_returns_400() {
    let (app, _store) = router(Faults { find: true, ..Faults::default() });
    let reply = send(&app, "GET", "/users", None).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body, json!({"status": 400, "message": "Bad Request"}));
}

#[tokio::test]
async fn read_and_delete_failures_return_404() {
    let (app, _store) = router(Faults::everything());
    let read = send(&app, "GET", "/devices/c1", None).await;
    assert_eq!(read.status, StatusCode::NOT_FOUND);
    let delete = send(&app, "DELETE", "/users/alice", None).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);
    assert_eq!(delete.body, json!({"status": 404, "message": "Not Found"}));
}

#[tokio::test]
async fn health_reports_database_error_but_stays_200() {
    let (app, _store) = router(Faults { health_check: true, ..Faults::default() });
    let reply = send(&app, "GET", "/health", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, json!({"api": "ok", "database": "error"}));
}
