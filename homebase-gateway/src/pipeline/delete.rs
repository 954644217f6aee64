//! `DELETE /<resource>/{key}`: delete → respond.

use axum::response::{IntoResponse, Response};
use homebase_core::{Key, ResourceKind};

use super::ok_envelope;
use crate::{context::AppContext, error::ApiError};

/// Marker for a completed delete; renders as `{"status": 200}`.
#[derive(Debug)]
pub struct Deleted;

/// Delete one document by natural key or record id.
///
/// # Errors
/// Returns [`ApiError::NotFound`] if nothing was removed, or
/// [`ApiError::LookupFailed`] (also a 404) if the store fails.
pub async fn delete(ctx: &AppContext, kind: ResourceKind, key: &Key) -> Result<Deleted, ApiError> {
    let removed = ctx
        .resources(kind)
        .delete_by_key(key)
        .await
        .map_err(|source| ApiError::LookupFailed { resource: kind, key: key.to_string(), source })?;
    if !removed {
        return Err(ApiError::NotFound { resource: kind, key: key.to_string() });
    }
    tracing::info!(resource = %kind, %key, "document deleted");
    Ok(Deleted)
}

impl IntoResponse for Deleted {
    fn into_response(self) -> Response {
        ok_envelope(None).into_response()
    }
}
