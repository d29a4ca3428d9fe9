use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One respondent's reply to one question.
///
/// `value` is the raw Likert value as selected. Reversal is applied only
/// when aggregating, never to the stored answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Answer {
    pub question_id: String,
    pub value: u8,
}

impl Answer {
    pub fn new(question_id: impl Into<String>, value: u8) -> Self {
        Self {
            question_id: question_id.into(),
            value,
        }
    }
}
