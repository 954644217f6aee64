//! `POST /<resource>`: validate → ensure unique → insert → respond.
//!
//! The uniqueness check and the insert are separate store calls. Two
//! concurrent creates with the same natural key can both pass the check and
//! both insert; the store has no unique constraint to stop the second one.

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use homebase_core::ResourceKind;
use homebase_store::{Fields, StoredDocument};
use serde_json::Value;

use super::ok_envelope;
use crate::{context::AppContext, error::ApiError};

/// A payload that passed its schema.
#[derive(Debug)]
pub struct Validated {
    kind: ResourceKind,
    key: Value,
    fields: Fields,
}

/// A validated payload whose natural key is not yet taken.
#[derive(Debug)]
pub struct Unique {
    kind: ResourceKind,
    fields: Fields,
}

/// The persisted document, ready to be rendered.
#[derive(Debug)]
pub struct Created {
    kind: ResourceKind,
    doc: StoredDocument,
}

impl Created {
    /// The document as stored, hidden fields included.
    #[must_use]
    pub fn document(&self) -> &StoredDocument {
        &self.doc
    }
}

/// Check `body` against `kind`'s create schema.
///
/// # Errors
/// Returns [`ApiError::Invalid`] if the schema rejects the payload, or if the
/// payload is not an object carrying the natural key field.
pub fn validate(ctx: &AppContext, kind: ResourceKind, body: Value) -> Result<Validated, ApiError> {
    let schema = kind.create_schema();
    let outcome = ctx.validator().validate(schema, &body);
    if !outcome.valid {
        return Err(ApiError::Invalid {
            schema: schema.to_owned(),
            errors: outcome.errors.unwrap_or_default(),
        });
    }

    let invalid = |reason: String| ApiError::Invalid { schema: schema.to_owned(), errors: vec![reason] };
    let Value::Object(fields) = body else {
        return Err(invalid("payload is not an object".to_owned()));
    };
    let key = fields
        .get(kind.key_field())
        .cloned()
        .ok_or_else(|| invalid(format!("missing '{}'", kind.key_field())))?;
    Ok(Validated { kind, key, fields })
}

/// Refuse the payload if a document with the same natural key exists.
///
/// # Errors
/// Returns [`ApiError::Conflict`] on a duplicate key, or [`ApiError::Store`]
/// if the lookup itself fails.
pub async fn ensure_unique(ctx: &AppContext, validated: Validated) -> Result<Unique, ApiError> {
    let Validated { kind, key, fields } = validated;
    if ctx.resources(kind).find_by_natural_key(&key).await?.is_some() {
        return Err(ApiError::Conflict { resource: kind, key: display_key(&key) });
    }
    Ok(Unique { kind, fields })
}

/// Stamp and persist the document.
///
/// # Errors
/// Returns [`ApiError::Store`] if the insert fails.
pub async fn insert(ctx: &AppContext, unique: Unique) -> Result<Created, ApiError> {
    let Unique { kind, fields } = unique;
    let doc = ctx.resources(kind).insert(fields).await?;
    let key = doc.get(kind.key_field()).map(display_key).unwrap_or_default();
    tracing::info!(resource = %kind, %key, id = %doc.id, "document created");
    Ok(Created { kind, doc })
}

impl IntoResponse for Created {
    fn into_response(self) -> Response {
        let Created { kind, doc } = self;
        let location = kind.document_path(doc.id);
        let visible = doc.without(kind.hidden_on_create());
        let mut response = ok_envelope(Some((kind.singular(), visible.into()))).into_response();
        if kind.emits_location() {
            match HeaderValue::from_str(&location) {
                Ok(value) => {
                    response.headers_mut().insert(header::LOCATION, value);
                }
                Err(e) => tracing::warn!(%location, error = %e, "unrepresentable Location header"),
            }
        }
        response
    }
}

fn display_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
