//! Axum route table for the homebase API.
//!
//! Both resources share one set of handlers; the [`ResourceKind`] each route
//! serves is attached as a request extension when the table is built.

use std::collections::HashMap;

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use homebase_core::{Key, ResourceKind};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    context::AppContext,
    error::ApiError,
    extract::CreateBody,
    pipeline::{
        create::{self, Created},
        delete::{self, Deleted},
        list::{self, Listed},
        read::{self, Found},
    },
};

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router over `ctx`.
pub fn create_router(ctx: AppContext) -> Router {
    let router = [ResourceKind::User, ResourceKind::Device]
        .into_iter()
        .fold(Router::new(), resource_routes);
    router
        .route("/health", get(health))
        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn resource_routes(router: Router<AppContext>, kind: ResourceKind) -> Router<AppContext> {
    let collection = format!("/{}", kind.collection());
    let document = format!("{collection}/{{key}}");
    router
        .route(
            &collection,
            post(create_resource).get(list_resources).layer(Extension(kind)),
        )
        .route(
            &document,
            get(read_resource).delete(delete_resource).layer(Extension(kind)),
        )
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health` — dependency status. Always 200.
pub async fn health(State(ctx): State<AppContext>) -> impl IntoResponse {
    let database = match ctx.store().health_check().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "store health check failed");
            "error"
        }
    };
    (StatusCode::OK, Json(json!({"api": "ok", "database": database})))
}

/// `POST /<resource>` — validate, ensure unique, insert. Accepts JSON or
/// urlencoded form bodies.
///
/// # Errors
/// Returns [`ApiError::Invalid`] / [`ApiError::MalformedBody`] (400),
/// [`ApiError::Conflict`] (409) or [`ApiError::Store`] (500).
pub async fn create_resource(
    State(ctx): State<AppContext>,
    Extension(kind): Extension<ResourceKind>,
    CreateBody(body): CreateBody,
) -> Result<Created, ApiError> {
    let validated = create::validate(&ctx, kind, body)?;
    let unique = create::ensure_unique(&ctx, validated).await?;
    create::insert(&ctx, unique).await
}

/// `GET /<resource>?<key field>=` — list `{id, key}` projections.
///
/// # Errors
/// Returns [`ApiError::ListFailed`] (400) if the store fails.
pub async fn list_resources(
    State(ctx): State<AppContext>,
    Extension(kind): Extension<ResourceKind>,
    Query(mut params): Query<HashMap<String, String>>,
) -> Result<Listed, ApiError> {
    let natural_key = params
        .remove(kind.key_field())
        .filter(|v| !v.is_empty())
        .map(Value::String);
    list::find(&ctx, kind, natural_key.as_ref()).await
}

/// `GET /<resource>/{key}` — fetch one document by natural key or id.
///
/// # Errors
/// Returns [`ApiError::NotFound`] or [`ApiError::LookupFailed`] (404), or
/// [`ApiError::MalformedPath`] (400) if the key does not decode.
pub async fn read_resource(
    State(ctx): State<AppContext>,
    Extension(kind): Extension<ResourceKind>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Found, ApiError> {
    let Path(raw) = path?;
    read::find(&ctx, kind, &Key::resolve(&raw)).await
}

/// `DELETE /<resource>/{key}` — delete one document by natural key or id.
///
/// # Errors
/// Returns [`ApiError::NotFound`] or [`ApiError::LookupFailed`] (404), or
/// [`ApiError::MalformedPath`] (400) if the key does not decode.
pub async fn delete_resource(
    State(ctx): State<AppContext>,
    Extension(kind): Extension<ResourceKind>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Deleted, ApiError> {
    let Path(raw) = path?;
    delete::delete(&ctx, kind, &Key::resolve(&raw)).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use homebase_store::MemoryStore;
    use tower::ServiceExt;

    use super::*;
    use crate::validation::SchemaValidator;

    fn test_router() -> Router {
        let validator = match SchemaValidator::builtin() {
            Ok(v) => v,
            Err(e) => panic!("builtin schemas must compile: {e}"),
        };
        create_router(AppContext::new(Arc::new(MemoryStore::new()), Arc::new(validator)))
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        let status = resp.status();
        let bytes = match axum::body::to_bytes(resp.into_body(), 64 * 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        let body = match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => panic!("invalid JSON: {e}"),
        };
        (status, body)
    }

    fn request(method: &str, uri: &str, body: Option<&str>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        let built = match body {
            Some(json) => builder.header("content-type", "application/json").body(Body::from(json.to_owned())),
            None => builder.body(Body::empty()),
        };
        match built {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        }
    }

    #[tokio::test]
    async fn health_response_format_reports_api_and_database() {
        let (status, body) = send(test_router(), request("GET", "/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"api": "ok", "database": "ok"}));
    }

    #[tokio::test]
    async fn create_with_non_json_body_returns_400_envelope() {
        let (status, body) = send(test_router(), request("POST", "/users", Some("{not json"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"status": 400, "message": "Bad Request"}));
    }

    #[tokio::test]
    async fn create_without_content_type_returns_400() {
        let req = match Request::builder()
            .method("POST")
            .uri("/devices")
            .body(Body::from(r#"{"chipId":"c1"}"#))
        {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let (status, body) = send(test_router(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn list_empty_collection_returns_empty_array() {
        let (status, body) = send(test_router(), request("GET", "/devices", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": 200, "devices": []}));
    }

    #[tokio::test]
    async fn unknown_key_returns_404_for_read_and_delete() {
        let app = test_router();
        let (status, body) = send(app.clone(), request("GET", "/users/nobody", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"status": 404, "message": "Not Found"}));

        let (status, _) = send(app, request("DELETE", "/devices/nothing", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn undecodable_key_returns_400_envelope() {
        let app = test_router();
        for method in ["GET", "DELETE"] {
            let (status, body) = send(app.clone(), request(method, "/users/%FF", None)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{method} must reject invalid UTF-8");
            assert_eq!(body, json!({"status": 400, "message": "Bad Request"}));
        }
    }

    #[tokio::test]
    async fn create_accepts_form_encoded_body() {
        let req = match Request::builder()
            .method("POST")
            .uri("/users")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("username=alice&password=x"))
        {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let (status, body) = send(test_router(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["username"], "alice");
        assert!(body["user"].get("password").is_none());
    }
}
