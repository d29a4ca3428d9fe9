//! Explicit session lifecycle:
//! `NotStarted → InProgress → Completed → Scored → Persisted`.

use aferir_core::models::result::{DimensionProgress, TestResult};
use aferir_core::models::session::{SessionRecord, SessionStatus};
use tracing::debug;

use crate::aggregate::{group_by_dimension, AnswerSheet};
use crate::engine;
use crate::error::ScoringError;
use crate::scoring::TestDefinition;

/// A respondent's session over one test definition.
///
/// Owned by the caller and threaded through the lifecycle methods; the
/// stored [`SessionRecord`] is recovered with [`Session::into_record`].
#[derive(Debug)]
pub struct Session<'a> {
    definition: &'a TestDefinition,
    record: SessionRecord,
    sheet: AnswerSheet,
}

impl<'a> Session<'a> {
    /// Resume a stored session. Its answers are re-validated against the
    /// definition.
    pub fn resume(definition: &'a TestDefinition, record: SessionRecord) -> Result<Self, ScoringError> {
        if record.test_id != definition.id {
            return Err(ScoringError::TestMismatch {
                test_id: definition.id.clone(),
                session_test: record.test_id,
            });
        }
        let sheet = AnswerSheet::from_map(definition, &record.answers)?;
        Ok(Self {
            definition,
            record,
            sheet,
        })
    }

    pub fn status(&self) -> SessionStatus {
        self.record.status
    }

    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    pub fn into_record(self) -> SessionRecord {
        self.record
    }

    pub fn start(&mut self, now: jiff::Timestamp) -> Result<(), ScoringError> {
        self.require(SessionStatus::NotStarted, "start")?;
        self.record.status = SessionStatus::InProgress;
        self.record.started_at = Some(now);
        self.record.updated_at = now;
        Ok(())
    }

    /// Store or overwrite one answer.
    pub fn record_answer(
        &mut self,
        question_id: &str,
        value: u8,
        now: jiff::Timestamp,
    ) -> Result<(), ScoringError> {
        self.require(SessionStatus::InProgress, "record an answer in")?;
        self.sheet.record(self.definition, question_id, value)?;
        self.record.answers.insert(question_id.to_string(), value);
        self.record.updated_at = now;
        debug!(
            session_id = %self.record.id,
            question_id,
            answered = self.sheet.len(),
            "answer recorded"
        );
        Ok(())
    }

    /// Close the session. Every question must have an answer.
    ///
    /// Completing an already completed session is a no-op.
    pub fn complete(&mut self, now: jiff::Timestamp) -> Result<(), ScoringError> {
        if self.record.status == SessionStatus::Completed {
            return Ok(());
        }
        self.require(SessionStatus::InProgress, "complete")?;

        let missing = self.sheet.missing(self.definition);
        if !missing.is_empty() {
            return Err(ScoringError::IncompleteSubmission { missing });
        }

        self.record.status = SessionStatus::Completed;
        self.record.completed_at = Some(now);
        self.record.updated_at = now;
        Ok(())
    }

    /// Compute the result of a completed session.
    ///
    /// Recomputing for a session that is already scored yields the same
    /// result and leaves the status unchanged.
    pub fn score(&mut self) -> Result<TestResult, ScoringError> {
        if self.record.status < SessionStatus::Completed {
            return Err(ScoringError::InvalidTransition {
                from: self.record.status,
                action: "score",
            });
        }

        let mut result = engine::score(self.definition, &self.sheet)?;
        result.duration_seconds = self.record.duration_seconds();
        result.completed_at = self.record.completed_at;

        if self.record.status == SessionStatus::Completed {
            self.record.status = SessionStatus::Scored;
        }
        Ok(result)
    }

    pub fn mark_persisted(&mut self, now: jiff::Timestamp) -> Result<(), ScoringError> {
        self.require(SessionStatus::Scored, "persist")?;
        self.record.status = SessionStatus::Persisted;
        self.record.updated_at = now;
        Ok(())
    }

    /// Answer coverage per dimension. Never classifies.
    pub fn progress(&self) -> Vec<DimensionProgress> {
        group_by_dimension(self.definition, &self.sheet)
            .into_iter()
            .map(|group| DimensionProgress {
                status: group.status(),
                answered: group.values.len() as u32,
                expected: group.expected,
                dimension: group.dimension,
            })
            .collect()
    }

    fn require(&self, expected: SessionStatus, action: &'static str) -> Result<(), ScoringError> {
        if self.record.status != expected {
            return Err(ScoringError::InvalidTransition {
                from: self.record.status,
                action,
            });
        }
        Ok(())
    }
}
