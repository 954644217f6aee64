/// Errors produced by the `homebase-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A string could not be parsed as a storage-assigned record identifier.
    #[error("invalid record id '{value}': {reason}")]
    InvalidRecordId { value: String, reason: String },
}
