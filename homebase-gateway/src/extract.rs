//! Request extractors shared by the resource handlers.

use axum::{
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
    Form, Json,
};
use serde_json::{Map, Value};

use crate::error::ApiError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A create payload, read as JSON or as a urlencoded form.
///
/// Form fields arrive as strings and become a flat JSON object; a repeated
/// name keeps its last value. Either way the result goes through the same
/// schema check.
#[derive(Debug)]
pub struct CreateBody(pub Value);

impl<S> FromRequest<S> for CreateBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(req.headers()) {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state).await?;
            let fields: Map<String, Value> =
                pairs.into_iter().map(|(name, value)| (name, Value::String(value))).collect();
            Ok(Self(Value::Object(fields)))
        } else {
            let Json(value) = Json::<Value>::from_request(req, state).await?;
            Ok(Self(value))
        }
    }
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}
