//! Stored documents and the query shapes used to select and trim them.

use homebase_core::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form document body, keyed by field name.
pub type Fields = Map<String, Value>;

/// Field name under which the record id is serialized.
pub const ID_FIELD: &str = "id";

/// A document as persisted: its storage-assigned id plus its fields.
///
/// Serializes flat, e.g. `{"id": "…", "username": "alice", …}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct StoredDocument {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: Fields,
}

impl StoredDocument {
    /// Wrap `fields` under `id`.
    #[must_use]
    pub fn new(id: RecordId, fields: Fields) -> Self {
        Self { id, fields }
    }

    /// Look up a single field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// A copy of this document without the named fields.
    #[must_use]
    pub fn without(&self, hidden: &[&str]) -> Self {
        let fields = self
            .fields
            .iter()
            .filter(|(name, _)| !hidden.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Self { id: self.id, fields }
    }
}

impl From<StoredDocument> for Value {
    fn from(doc: StoredDocument) -> Self {
        let mut map = Map::with_capacity(doc.fields.len() + 1);
        map.insert(ID_FIELD.to_owned(), Value::String(doc.id.to_string()));
        map.extend(doc.fields);
        Value::Object(map)
    }
}

/// Document selector understood by every [`DocumentStore`](crate::DocumentStore).
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Filter {
    /// Matches every document.
    All,
    /// Matches the document with this record id.
    Id(RecordId),
    /// Matches documents whose `field` equals `value` exactly.
    FieldEq { field: String, value: Value },
    /// Matches documents matched by any of the inner filters.
    Or(Vec<Filter>),
}

impl Filter {
    /// Shorthand for [`Filter::FieldEq`].
    pub fn field_eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::FieldEq { field: field.into(), value: value.into() }
    }

    /// Evaluate the filter against a document.
    #[must_use]
    pub fn matches(&self, doc: &StoredDocument) -> bool {
        match self {
            Self::All => true,
            Self::Id(id) => doc.id == *id,
            Self::FieldEq { field, value } => doc.get(field) == Some(value),
            Self::Or(filters) => filters.iter().any(|f| f.matches(doc)),
        }
    }
}

/// Field selection applied to query results. The id is always kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    fields: Vec<String>,
}

impl Projection {
    /// Keep only `fields` (plus the id).
    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { fields: fields.into_iter().map(Into::into).collect() }
    }

    /// Apply the projection to a document.
    #[must_use]
    pub fn apply(&self, doc: &StoredDocument) -> StoredDocument {
        let fields = self
            .fields
            .iter()
            .filter_map(|name| doc.get(name).map(|value| (name.clone(), value.clone())))
            .collect();
        StoredDocument { id: doc.id, fields }
    }
}
