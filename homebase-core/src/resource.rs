use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::RecordId;

/// The resource types exposed by the API.
///
/// Each kind carries the static facts the generic pipeline needs: which
/// collection it lives in, which field is its natural key, which schema
/// guards its creation, and which fields never leave the server on create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ResourceKind {
    /// Accounts keyed by `username`.
    User,
    /// Devices keyed by `chipId`.
    Device,
}

impl ResourceKind {
    /// Name of the backing document collection, also the route prefix.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Device => "devices",
        }
    }

    /// Field holding the natural key.
    #[must_use]
    pub const fn key_field(self) -> &'static str {
        match self {
            Self::User => "username",
            Self::Device => "chipId",
        }
    }

    /// Name of the JSON schema that validates create payloads.
    #[must_use]
    pub const fn create_schema(self) -> &'static str {
        match self {
            Self::User => "user_create",
            Self::Device => "device_create",
        }
    }

    /// Envelope field for a single document, e.g. `{"user": {...}}`.
    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Device => "device",
        }
    }

    /// Envelope field for a list, e.g. `{"users": [...]}`.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        self.collection()
    }

    /// Fields stripped from the create response.
    #[must_use]
    pub const fn hidden_on_create(self) -> &'static [&'static str] {
        match self {
            Self::User => &["password", "__version"],
            Self::Device => &[],
        }
    }

    /// Whether a successful create answers with a `Location` header.
    #[must_use]
    pub const fn emits_location(self) -> bool {
        matches!(self, Self::User)
    }

    /// Canonical path of a single document, e.g. `/users/<id>`.
    #[must_use]
    pub fn document_path(self, id: RecordId) -> String {
        format!("/{}/{id}", self.collection())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

/// Creation and modification stamps written on insert.
///
/// Both are milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Timestamps {
    pub created_at: i64,
    pub last_modified: i64,
}

impl Timestamps {
    /// Field name of the creation stamp.
    pub const CREATED_AT: &'static str = "createdAt";
    /// Field name of the modification stamp.
    pub const LAST_MODIFIED: &'static str = "lastModified";

    /// Stamps for a document created at `at`.
    #[must_use]
    pub fn created(at: DateTime<Utc>) -> Self {
        let millis = at.timestamp_millis();
        Self { created_at: millis, last_modified: millis }
    }

    /// Stamps for a document created now.
    #[must_use]
    pub fn now() -> Self {
        Self::created(Utc::now())
    }
}
