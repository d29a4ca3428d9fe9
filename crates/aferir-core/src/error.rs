use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("key {key:?} is not a {expected} key")]
    InvalidKey { key: String, expected: &'static str },

    #[error("invalid session id in key: {0}")]
    InvalidSessionId(#[from] uuid::Error),
}
