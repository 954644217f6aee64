//! Fuzz target: schema validation of arbitrary create payloads.
//!
//! Any byte sequence that parses as JSON is run through both built-in
//! create schemas. Validation must never panic.

#![no_main]

use std::sync::OnceLock;

use homebase_gateway::validation::SchemaValidator;
use libfuzzer_sys::fuzz_target;

static VALIDATOR: OnceLock<Option<SchemaValidator>> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let Some(validator) = VALIDATOR.get_or_init(|| SchemaValidator::builtin().ok()) else {
        return;
    };
    let Ok(payload) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    for schema in ["user_create", "device_create"] {
        let _ = validator.validate(schema, &payload);
    }
});
