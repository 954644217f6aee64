//! Error types for the gateway crate.
//!
//! Every pipeline step fails with an [`ApiError`]; its [`IntoResponse`]
//! impl logs the failure and renders the `{status, message}` envelope, so
//! nothing reaches the transport layer unhandled.

use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use homebase_core::ResourceKind;
use homebase_store::StoreError;
use serde_json::json;

/// Errors that terminate a request pipeline.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The payload failed its JSON schema.
    #[error("payload rejected by schema '{schema}'")]
    Invalid { schema: String, errors: Vec<String> },

    /// The body could not be read as JSON or as a form at all.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// The `{key}` path segment could not be decoded.
    #[error("malformed path: {0}")]
    MalformedPath(String),

    /// A document with the same natural key already exists.
    #[error("{resource} '{key}' already exists")]
    Conflict { resource: ResourceKind, key: String },

    /// The lookup or delete target does not exist.
    #[error("{resource} '{key}' not found")]
    NotFound { resource: ResourceKind, key: String },

    /// The store failed during the uniqueness check or the insert.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The store failed while listing. Answered with 400, unlike [`ApiError::Store`].
    #[error("listing {resource} failed: {source}")]
    ListFailed { resource: ResourceKind, source: StoreError },

    /// The store failed during a single read or delete. Answered with 404.
    #[error("lookup of {resource} '{key}' failed: {source}")]
    LookupFailed { resource: ResourceKind, key: String, source: StoreError },
}

impl ApiError {
    /// HTTP status this error is answered with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Invalid { .. }
            | Self::MalformedBody(_)
            | Self::MalformedPath(_)
            | Self::ListFailed { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } | Self::LookupFailed { .. } => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        let status = self.status().as_u16();
        match self {
            Self::Invalid { errors, .. } => {
                tracing::warn!(status, error = %self, ?errors, "request rejected");
            }
            Self::Store(_) | Self::ListFailed { .. } | Self::LookupFailed { .. } => {
                tracing::error!(status, error = %self, "store failure");
            }
            _ => tracing::warn!(status, error = %self, "request rejected"),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::MalformedPath(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();
        let message = status.canonical_reason().unwrap_or("Unknown Error");
        (status, Json(json!({"status": status.as_u16(), "message": message}))).into_response()
    }
}
