//! `GET /<resource>`: find → respond.

use axum::response::{IntoResponse, Response};
use homebase_core::ResourceKind;
use homebase_store::StoredDocument;
use serde_json::Value;

use super::ok_envelope;
use crate::{context::AppContext, error::ApiError};

/// The `{id, <key field>}` projections of the matching documents.
#[derive(Debug)]
pub struct Listed {
    kind: ResourceKind,
    docs: Vec<StoredDocument>,
}

/// List `kind`, optionally filtered to an exact natural key.
///
/// # Errors
/// Returns [`ApiError::ListFailed`] (answered with 400) if the store fails.
pub async fn find(
    ctx: &AppContext,
    kind: ResourceKind,
    natural_key: Option<&Value>,
) -> Result<Listed, ApiError> {
    let docs = ctx
        .resources(kind)
        .list(natural_key)
        .await
        .map_err(|source| ApiError::ListFailed { resource: kind, source })?;
    tracing::info!(resource = %kind, count = docs.len(), "documents listed");
    Ok(Listed { kind, docs })
}

impl IntoResponse for Listed {
    fn into_response(self) -> Response {
        let items: Vec<Value> = self.docs.into_iter().map(Value::from).collect();
        ok_envelope(Some((self.kind.plural(), Value::Array(items)))).into_response()
    }
}
