use thiserror::Error;

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("model returned no message")]
    EmptyResponse,

    #[error("model response contains no JSON object: {0}")]
    NotJson(String),

    #[error("model response is not a valid narrative: {0}")]
    SchemaViolation(String),
}
