use serde::Serialize;
use thiserror::Error;

use aferir_core::models::session::SessionStatus;

/// Unanswered questions of one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingAnswers {
    pub dimension: String,
    pub question_ids: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("unknown test: {0}")]
    UnknownTest(String),

    #[error("question set unavailable for test '{test_id}': {reason}")]
    QuestionSourceUnavailable { test_id: String, reason: String },

    #[error("unknown question '{question_id}' for test '{test_id}'")]
    UnknownQuestion {
        test_id: String,
        question_id: String,
    },

    #[error("answer {value} for question '{question_id}' is outside the scale [{min}, {max}]")]
    InputValidation {
        question_id: String,
        value: u8,
        min: u8,
        max: u8,
    },

    #[error("incomplete submission: {} dimension(s) have unanswered questions", .missing.len())]
    IncompleteSubmission { missing: Vec<MissingAnswers> },

    #[error("invalid definition for test '{test_id}': {reason}")]
    InvalidDefinition { test_id: String, reason: String },

    #[error("cannot {action} a session that is {from:?}")]
    InvalidTransition {
        from: SessionStatus,
        action: &'static str,
    },

    #[error("session is for test '{session_test}', not '{test_id}'")]
    TestMismatch {
        test_id: String,
        session_test: String,
    },
}
