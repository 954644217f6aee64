//! Lookup keys for single-document reads and deletes.
//!
//! A path segment such as `/users/{key}` names a document either by its
//! natural key (`username`, `chipId`) or by its storage-assigned
//! [`RecordId`]. The segment is resolved into a [`Key`] once, at the HTTP
//! boundary, and the store layer decides how each variant is matched.

use std::fmt;

use crate::id::RecordId;

/// A resolved lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Key {
    /// Domain-meaningful identifier, e.g. a username or a chip ID.
    Natural(String),
    /// Storage-assigned identifier.
    ///
    /// Since a natural key may itself look like a record id, stores match
    /// this variant against both the identifier and the natural key field.
    Record(RecordId),
}

impl Key {
    /// Resolve a raw path segment.
    ///
    /// Segments in canonical record-id form become [`Key::Record`]; anything
    /// else is a [`Key::Natural`].
    #[must_use]
    pub fn resolve(raw: &str) -> Self {
        match raw.parse::<RecordId>() {
            Ok(id) => Self::Record(id),
            Err(_) => Self::Natural(raw.to_owned()),
        }
    }

    /// The key as it would appear in the natural key field.
    #[must_use]
    pub fn as_natural(&self) -> String {
        match self {
            Self::Natural(s) => s.clone(),
            Self::Record(id) => id.to_string(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Natural(s) => f.write_str(s),
            Self::Record(id) => write!(f, "{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn key_resolve_plain_name_is_natural() {
        assert_eq!(Key::resolve("alice"), Key::Natural("alice".to_owned()));
    }

    #[test]
    fn key_resolve_canonical_uuid_is_record() {
        let id = RecordId::new();
        assert_eq!(Key::resolve(&id.to_string()), Key::Record(id));
    }

    #[test]
    fn key_resolve_non_canonical_uuid_is_natural() {
        let id = RecordId::new();
        let upper = id.to_string().to_uppercase();
        assert_eq!(Key::resolve(&upper), Key::Natural(upper.clone()));

        let simple = id.as_uuid().simple().to_string();
        assert_eq!(Key::resolve(&simple), Key::Natural(simple.clone()));
    }

    #[test]
    fn key_display_matches_natural_form() {
        let id = RecordId::new();
        let key = Key::Record(id);
        assert_eq!(key.to_string(), key.as_natural());
        assert_eq!(Key::Natural("chip-7".to_owned()).to_string(), "chip-7");
    }

    proptest! {
        #[test]
        fn key_resolve_preserves_raw_text(raw in "\\PC{0,40}") {
            prop_assert_eq!(Key::resolve(&raw).as_natural(), raw);
        }

        #[test]
        fn key_resolve_record_ids_round_trip(bytes in any::<[u8; 16]>()) {
            let id = RecordId::from(uuid::Uuid::from_bytes(bytes));
            prop_assert_eq!(Key::resolve(&id.to_string()), Key::Record(id));
        }
    }
}
