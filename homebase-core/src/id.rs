use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Storage-assigned identifier of a persisted document.
///
/// Serialized as the canonical hyphenated UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub struct RecordId(pub Uuid);

impl RecordId {
    /// Creates a new random `RecordId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner `Uuid`.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RecordId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for RecordId {
    type Err = CoreError;

    /// Accepts only the canonical lowercase hyphenated form, so that
    /// `id.to_string().parse()` is the identity and nothing else parses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::parse_str(s).map_err(|e| CoreError::InvalidRecordId {
            value: s.to_owned(),
            reason: e.to_string(),
        })?;
        let canonical = uuid.hyphenated().to_string();
        if canonical != s {
            return Err(CoreError::InvalidRecordId {
                value: s.to_owned(),
                reason: format!("not in canonical form '{canonical}'"),
            });
        }
        Ok(Self(uuid))
    }
}
