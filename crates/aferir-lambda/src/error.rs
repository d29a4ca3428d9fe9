use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use aferir_instruments::error::ScoringError;
use aferir_instruments::scoring::ValidationError;
use aferir_storage::error::StorageError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    /// Well-formed request the scoring rules reject. `details` carries the
    /// per-question problems.
    Unprocessable {
        message: String,
        details: Option<serde_json::Value>,
    },
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn invalid_answers(errors: Vec<ValidationError>) -> Self {
        ApiError::Unprocessable {
            message: format!("{} answer(s) rejected", errors.len()),
            details: serde_json::to_value(errors).ok(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            ApiError::Unprocessable { message, details } => (StatusCode::UNPROCESSABLE_ENTITY, message, details),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string(), None)
            }
        };

        (status, Json(ErrorBody { error: message, details })).into_response()
    }
}

impl From<ScoringError> for ApiError {
    fn from(e: ScoringError) -> Self {
        match e {
            ScoringError::UnknownTest(_) => ApiError::NotFound(e.to_string()),
            ScoringError::InputValidation {
                ref question_id,
                value,
                min,
                max,
            } => ApiError::Unprocessable {
                details: Some(serde_json::json!({
                    "question_id": question_id,
                    "value": value,
                    "min": min,
                    "max": max,
                })),
                message: e.to_string(),
            },
            ScoringError::UnknownQuestion { ref question_id, .. } => ApiError::Unprocessable {
                details: Some(serde_json::json!({ "question_id": question_id })),
                message: e.to_string(),
            },
            ScoringError::IncompleteSubmission { ref missing } => ApiError::Unprocessable {
                details: serde_json::to_value(missing).ok(),
                message: e.to_string(),
            },
            ScoringError::InvalidTransition { .. } | ScoringError::TestMismatch { .. } => {
                ApiError::Conflict(e.to_string())
            }
            ScoringError::QuestionSourceUnavailable { .. } | ScoringError::InvalidDefinition { .. } => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => ApiError::NotFound(format!("object not found: {key}")),
            StorageError::PreconditionFailed { .. } => {
                ApiError::Conflict("session was modified by another request; reload and retry".to_string())
            }
            StorageError::AlreadyExists { key } => ApiError::Conflict(format!("already exists: {key}")),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
