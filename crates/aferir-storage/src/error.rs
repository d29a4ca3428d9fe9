use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("object already exists: {key}")]
    AlreadyExists { key: String },

    /// The object changed since it was read.
    #[error("object was modified concurrently: {key}")]
    PreconditionFailed { key: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid key: {0}")]
    Key(#[from] aferir_core::error::CoreError),

    #[error("S3 {operation} failed: {message}")]
    S3 { operation: &'static str, message: String },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub(crate) fn s3(operation: &'static str, message: impl ToString) -> Self {
        StorageError::S3 {
            operation,
            message: message.to_string(),
        }
    }
}
