//! Error types for the store crate.

/// Errors that can occur while talking to a document store.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The backend could not be reached or refused the operation.
    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },

    /// A collection lock was poisoned by a panicking writer.
    #[error("collection '{collection}' lock poisoned")]
    LockPoisoned { collection: String },

    /// A document could not be written in its current shape.
    #[error("invalid document for '{collection}': {reason}")]
    InvalidDocument { collection: String, reason: String },

    /// The SQLite backend failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}
