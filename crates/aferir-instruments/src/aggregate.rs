//! Answer collection and grouping by dimension.

use std::collections::BTreeMap;

use aferir_core::models::answer::Answer;
use aferir_core::models::result::DimensionStatus;

use crate::error::{MissingAnswers, ScoringError};
use crate::scoring::TestDefinition;

/// The raw answers of one respondent, keyed by question id.
///
/// Values are stored exactly as selected. Reversal happens in
/// [`group_by_dimension`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    answers: BTreeMap<String, u8>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_answers(definition: &TestDefinition, answers: &[Answer]) -> Result<Self, ScoringError> {
        let mut sheet = Self::new();
        for answer in answers {
            sheet.record(definition, &answer.question_id, answer.value)?;
        }
        Ok(sheet)
    }

    pub fn from_map(
        definition: &TestDefinition,
        answers: &BTreeMap<String, u8>,
    ) -> Result<Self, ScoringError> {
        let mut sheet = Self::new();
        for (question_id, value) in answers {
            sheet.record(definition, question_id, *value)?;
        }
        Ok(sheet)
    }

    /// Store or overwrite the answer to one question.
    ///
    /// Out-of-range values and unknown questions are rejected, never clamped.
    pub fn record(
        &mut self,
        definition: &TestDefinition,
        question_id: &str,
        value: u8,
    ) -> Result<(), ScoringError> {
        if definition.question(question_id).is_none() {
            return Err(ScoringError::UnknownQuestion {
                test_id: definition.id.clone(),
                question_id: question_id.to_string(),
            });
        }
        if !definition.scale.contains(value) {
            return Err(ScoringError::InputValidation {
                question_id: question_id.to_string(),
                value,
                min: definition.scale.min,
                max: definition.scale.max,
            });
        }
        self.answers.insert(question_id.to_string(), value);
        Ok(())
    }

    pub fn get(&self, question_id: &str) -> Option<u8> {
        self.answers.get(question_id).copied()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, u8> {
        &self.answers
    }

    /// Unanswered questions grouped by dimension, in bank order.
    pub fn missing(&self, definition: &TestDefinition) -> Vec<MissingAnswers> {
        definition
            .dimensions()
            .into_iter()
            .filter_map(|dimension| {
                let question_ids: Vec<String> = definition
                    .questions_in(dimension)
                    .filter(|q| !self.answers.contains_key(&q.id))
                    .map(|q| q.id.clone())
                    .collect();
                (!question_ids.is_empty()).then(|| MissingAnswers {
                    dimension: dimension.to_string(),
                    question_ids,
                })
            })
            .collect()
    }
}

/// The reversal-adjusted values collected for one dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionValues {
    pub dimension: String,
    pub sub_test: Option<String>,
    /// Questions the bank defines for this dimension.
    pub expected: u32,
    pub values: Vec<u8>,
}

impl DimensionValues {
    pub fn status(&self) -> DimensionStatus {
        if self.values.len() as u32 >= self.expected {
            DimensionStatus::Complete
        } else {
            DimensionStatus::Incomplete
        }
    }

    pub fn sum(&self) -> u32 {
        self.values.iter().map(|v| u32::from(*v)).sum()
    }
}

/// Collect every dimension's answered values, applying reversal once.
///
/// Every dimension of the bank is present in the output, including ones
/// with no answers yet; callers decide what an incomplete dimension means.
pub fn group_by_dimension(definition: &TestDefinition, sheet: &AnswerSheet) -> Vec<DimensionValues> {
    definition
        .dimension_question_counts()
        .into_iter()
        .map(|(dimension, expected)| DimensionValues {
            dimension: dimension.to_string(),
            sub_test: definition.sub_test_of(dimension).map(str::to_string),
            expected,
            values: definition
                .questions_in(dimension)
                .filter_map(|q| {
                    sheet
                        .get(&q.id)
                        .map(|raw| q.adjusted_value(definition.scale, raw))
                })
                .collect(),
        })
        .collect()
}
