//! Per-route request pipelines.
//!
//! Each route runs a short, linear chain of steps:
//!
//! - create: [`create::validate`] → [`create::ensure_unique`] → [`create::insert`]
//! - list: [`list::find`]
//! - single read: [`read::find`]
//! - delete: [`delete::delete`]
//!
//! A step takes the previous step's output by value and returns
//! `Result<Next, ApiError>`, so `?` halts the chain on the first failure and
//! no later step runs. The last state of each chain implements
//! [`IntoResponse`](axum::response::IntoResponse) and renders the success
//! envelope.

pub mod create;
pub mod delete;
pub mod list;
pub mod read;

use axum::{http::StatusCode, Json};
use serde_json::{Map, Value};

/// `{"status": 200, <field>: <payload>}`, or just `{"status": 200}`.
fn ok_envelope(payload: Option<(&str, Value)>) -> (StatusCode, Json<Value>) {
    let status = StatusCode::OK;
    let mut body = Map::new();
    body.insert("status".to_owned(), Value::from(status.as_u16()));
    if let Some((field, value)) = payload {
        body.insert(field.to_owned(), value);
    }
    (status, Json(Value::Object(body)))
}
