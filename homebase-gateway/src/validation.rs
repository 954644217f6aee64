//! Named JSON-schema validation for request payloads.
//!
//! Schemas are compiled once, when the validator is built, and looked up by
//! name afterwards. The built-in set is embedded at compile time; a schema
//! directory can override or extend it at startup.

use std::{fs, path::Path};

use indexmap::IndexMap;
use jsonschema::Validator;
use serde_json::Value;

/// Schemas compiled into every validator, by name.
const BUILTIN_SCHEMAS: &[(&str, &str)] = &[
    ("user_create", include_str!("../schemas/user_create.json")),
    ("device_create", include_str!("../schemas/device_create.json")),
];

/// Errors raised while loading or compiling schemas.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// A schema source is not valid JSON.
    #[error("schema '{name}' is not valid JSON: {source}")]
    Parse { name: String, source: serde_json::Error },

    /// A schema is valid JSON but not a valid JSON schema.
    #[error("schema '{name}' failed to compile: {reason}")]
    Compile { name: String, reason: String },

    /// A schema file or directory could not be read.
    #[error("failed to read schema from {path}: {source}")]
    Io { path: String, source: std::io::Error },
}

/// Result of validating one payload.
///
/// `errors` is `None` when the payload is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Validation {
    pub valid: bool,
    pub errors: Option<Vec<String>>,
}

impl Validation {
    fn ok() -> Self {
        Self { valid: true, errors: None }
    }

    fn rejected(errors: Vec<String>) -> Self {
        Self { valid: false, errors: Some(errors) }
    }
}

/// Registry of compiled schemas. Stateless after construction and safe to
/// share across concurrent requests.
pub struct SchemaValidator {
    schemas: IndexMap<String, Validator>,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schemas", &self.schemas.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SchemaValidator {
    /// Compile the built-in schemas.
    ///
    /// # Errors
    /// Returns [`SchemaError`] if an embedded schema does not compile.
    pub fn builtin() -> Result<Self, SchemaError> {
        let mut validator = Self { schemas: IndexMap::new() };
        for (name, source) in BUILTIN_SCHEMAS {
            validator.register_source(name, source)?;
        }
        Ok(validator)
    }

    /// Compile the built-in schemas, then every `<name>.json` in `dir`,
    /// replacing built-ins of the same name.
    ///
    /// # Errors
    /// Returns [`SchemaError`] if the directory cannot be read or any schema
    /// fails to parse or compile.
    pub fn load(dir: Option<&Path>) -> Result<Self, SchemaError> {
        let mut validator = Self::builtin()?;
        let Some(dir) = dir else {
            return Ok(validator);
        };

        let io_err = |path: &Path, source: std::io::Error| SchemaError::Io {
            path: path.display().to_string(),
            source,
        };
        let entries = fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
        for entry in entries {
            let path = entry.map_err(|e| io_err(dir, e))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let source = fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
            validator.register_source(name, &source)?;
            tracing::info!(schema = name, path = %path.display(), "loaded schema override");
        }
        Ok(validator)
    }

    /// Compile `schema` and register it under `name`.
    ///
    /// # Errors
    /// Returns [`SchemaError::Compile`] if `schema` is not a valid JSON schema.
    pub fn register(&mut self, name: &str, schema: &Value) -> Result<(), SchemaError> {
        let compiled = jsonschema::validator_for(schema).map_err(|e| SchemaError::Compile {
            name: name.to_owned(),
            reason: e.to_string(),
        })?;
        self.schemas.insert(name.to_owned(), compiled);
        Ok(())
    }

    fn register_source(&mut self, name: &str, source: &str) -> Result<(), SchemaError> {
        let schema: Value = serde_json::from_str(source)
            .map_err(|source| SchemaError::Parse { name: name.to_owned(), source })?;
        self.register(name, &schema)
    }

    /// Names of all registered schemas, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Validate `data` against the schema registered as `name`.
    ///
    /// Fails closed: an unknown schema name yields an invalid result.
    #[must_use]
    pub fn validate(&self, name: &str, data: &Value) -> Validation {
        let Some(schema) = self.schemas.get(name) else {
            tracing::error!(schema = name, "validation requested for unknown schema");
            return Validation::rejected(vec![format!("unknown schema '{name}'")]);
        };
        let errors: Vec<String> = schema
            .iter_errors(data)
            .map(|e| format!("{}: {e}", e.instance_path))
            .collect();
        if errors.is_empty() {
            Validation::ok()
        } else {
            Validation::rejected(errors)
        }
    }
}
