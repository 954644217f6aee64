//! `GET /<resource>/{key}`: find → respond.

use axum::response::{IntoResponse, Response};
use homebase_core::{Key, ResourceKind};
use homebase_store::StoredDocument;

use super::ok_envelope;
use crate::{context::AppContext, error::ApiError};

/// The full stored document.
#[derive(Debug)]
pub struct Found {
    kind: ResourceKind,
    doc: StoredDocument,
}

/// Look up one document by natural key or record id.
///
/// # Errors
/// Returns [`ApiError::NotFound`] if nothing matches, or
/// [`ApiError::LookupFailed`] (also a 404) if the store fails.
pub async fn find(ctx: &AppContext, kind: ResourceKind, key: &Key) -> Result<Found, ApiError> {
    let found = ctx
        .resources(kind)
        .find_by_key(key)
        .await
        .map_err(|source| ApiError::LookupFailed { resource: kind, key: key.to_string(), source })?;
    let Some(doc) = found else {
        return Err(ApiError::NotFound { resource: kind, key: key.to_string() });
    };
    tracing::info!(resource = %kind, %key, id = %doc.id, "document retrieved");
    Ok(Found { kind, doc })
}

impl IntoResponse for Found {
    fn into_response(self) -> Response {
        ok_envelope(Some((self.kind.singular(), self.doc.into()))).into_response()
    }
}
