use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::answer::Answer;
use super::result::TestResult;

/// Lifecycle of a questionnaire session.
///
/// `NotStarted → InProgress → Completed → Scored → Persisted`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Completed,
    Scored,
    Persisted,
}

impl SessionStatus {
    /// Whether a result has already been computed for this session.
    pub fn is_scored(&self) -> bool {
        matches!(self, SessionStatus::Scored | SessionStatus::Persisted)
    }
}

/// The stored state of one respondent taking one test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionRecord {
    pub id: Uuid,
    pub company_id: String,
    pub respondent_id: String,
    pub test_id: String,
    pub status: SessionStatus,
    /// Raw answers keyed by question id, as selected by the respondent.
    pub answers: BTreeMap<String, u8>,
    pub created_at: jiff::Timestamp,
    pub started_at: Option<jiff::Timestamp>,
    pub completed_at: Option<jiff::Timestamp>,
    pub updated_at: jiff::Timestamp,
}

impl SessionRecord {
    pub fn new(
        company_id: impl Into<String>,
        respondent_id: impl Into<String>,
        test_id: impl Into<String>,
        now: jiff::Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id: company_id.into(),
            respondent_id: respondent_id.into(),
            test_id: test_id.into(),
            status: SessionStatus::NotStarted,
            answers: BTreeMap::new(),
            created_at: now,
            started_at: None,
            completed_at: None,
            updated_at: now,
        }
    }

    pub fn answer_list(&self) -> Vec<Answer> {
        self.answers
            .iter()
            .map(|(question_id, value)| Answer::new(question_id.clone(), *value))
            .collect()
    }

    /// Whole seconds between start and completion, if both are known.
    pub fn duration_seconds(&self) -> Option<i64> {
        let started = self.started_at?;
        let completed = self.completed_at?;
        Some(completed.as_second() - started.as_second())
    }
}

/// The persisted outcome of a session: the raw answers as submitted plus
/// the computed result, so the score can be audited and recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoredSession {
    pub session: SessionRecord,
    pub result: TestResult,
}
