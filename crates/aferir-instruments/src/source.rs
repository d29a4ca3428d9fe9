use crate::error::ScoringError;
use crate::get_instrument;
use crate::scoring::Question;

/// Supplies the question bank of a test.
pub trait QuestionSource {
    /// Return the ordered questions of `test_id`.
    ///
    /// An empty bank is [`ScoringError::QuestionSourceUnavailable`], never
    /// an empty-but-valid test.
    fn questions(&self, test_id: &str) -> Result<Vec<Question>, ScoringError>;
}

/// Serves the built-in test catalogue.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticQuestionSource;

impl QuestionSource for StaticQuestionSource {
    fn questions(&self, test_id: &str) -> Result<Vec<Question>, ScoringError> {
        let instrument =
            get_instrument(test_id).ok_or_else(|| ScoringError::UnknownTest(test_id.to_string()))?;
        let questions = &instrument.definition().questions;
        if questions.is_empty() {
            return Err(ScoringError::QuestionSourceUnavailable {
                test_id: test_id.to_string(),
                reason: "question bank is empty".to_string(),
            });
        }
        Ok(questions.clone())
    }
}
