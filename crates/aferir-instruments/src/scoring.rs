use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use aferir_core::models::result::Classification;

use crate::error::ScoringError;

/// The ordinal response scale of a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LikertScale {
    pub min: u8,
    pub max: u8,
}

impl LikertScale {
    pub const ONE_TO_FIVE: LikertScale = LikertScale { min: 1, max: 5 };

    pub fn contains(&self, value: u8) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Mirror a value around the middle of the scale: `(max + min) - value`.
    ///
    /// Computed in `u16`; for a value inside the scale the result is too.
    pub fn invert(&self, value: u8) -> u8 {
        let mirrored = (u16::from(self.max) + u16::from(self.min)).saturating_sub(u16::from(value));
        u8::try_from(mirrored).unwrap_or(u8::MAX)
    }

    pub fn width(&self) -> u8 {
        self.max - self.min
    }
}

/// One item of a test's questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub dimension: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_test: Option<String>,
    /// Phrased against its dimension; inverted before aggregation.
    #[serde(default)]
    pub reversed: bool,
}

impl Question {
    pub fn new(id: impl Into<String>, dimension: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            dimension: dimension.into(),
            sub_test: None,
            reversed: false,
        }
    }

    pub fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    pub fn in_sub_test(mut self, sub_test: impl Into<String>) -> Self {
        self.sub_test = Some(sub_test.into());
        self
    }

    /// The value that enters the dimension aggregate for a raw answer.
    pub fn adjusted_value(&self, scale: LikertScale, raw: u8) -> u8 {
        if self.reversed { scale.invert(raw) } else { raw }
    }
}

/// A named sub-instrument of a composite test.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubTest {
    pub id: String,
    pub name: String,
}

/// How a dimension's answers become its presentation score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum DimensionConvention {
    /// `round(sum / (count × max) × 100)`, presented as 0–100.
    Percentage,
    /// `round(mean, 2)` on the answer scale. With `rescale`, also a
    /// `((mean - min) / (max - min)) × 100` index that is classified instead.
    Mean { rescale: bool },
    /// Plain sum, capped at `count × max`.
    RawSum,
}

/// How the overall score is rolled up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OverallConvention {
    MeanOfDimensions,
    MeanOfAnswers,
    MeanOfSubTests,
}

/// Which number the overall band table is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OverallBasis {
    OverallScore,
    RawTotal,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Band {
    /// Inclusive lower bound.
    pub min: f64,
    pub label: String,
}

/// Ordered classification bands, highest threshold first.
///
/// A score below every bound falls into the last band.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BandTable {
    pub bands: Vec<Band>,
}

impl BandTable {
    pub fn new(bands: &[(f64, &str)]) -> Self {
        Self {
            bands: bands
                .iter()
                .map(|(min, label)| Band {
                    min: *min,
                    label: label.to_string(),
                })
                .collect(),
        }
    }

    pub fn classify(&self, score: f64) -> Classification {
        let last = self.bands.len().saturating_sub(1);
        let index = self
            .bands
            .iter()
            .position(|band| score >= band.min)
            .unwrap_or(last);

        Classification {
            label: self
                .bands
                .get(index)
                .map(|b| b.label.clone())
                .unwrap_or_default(),
            tier: (last - index) as u32,
        }
    }

    fn check(&self) -> Result<(), String> {
        if self.bands.is_empty() {
            return Err("band table is empty".to_string());
        }
        for pair in self.bands.windows(2) {
            if pair[0].min <= pair[1].min {
                return Err(format!(
                    "bands must be strictly descending: '{}' ({}) before '{}' ({})",
                    pair[0].label, pair[0].min, pair[1].label, pair[1].min
                ));
            }
        }
        Ok(())
    }
}

/// Everything the engine needs to score one test.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TestDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub scale: LikertScale,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub sub_tests: Vec<SubTest>,
    pub dimension_convention: DimensionConvention,
    pub overall_convention: OverallConvention,
    pub overall_basis: OverallBasis,
    pub dimension_bands: BandTable,
    pub overall_bands: BandTable,
}

impl TestDefinition {
    /// Dimension labels in order of first appearance.
    pub fn dimensions(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.questions
            .iter()
            .map(|q| q.dimension.as_str())
            .filter(|d| seen.insert(*d))
            .collect()
    }

    /// Number of questions per dimension, in order of first appearance.
    pub fn dimension_question_counts(&self) -> Vec<(&str, u32)> {
        self.dimensions()
            .into_iter()
            .map(|d| (d, self.questions_in(d).count() as u32))
            .collect()
    }

    pub fn questions_in<'a>(&'a self, dimension: &'a str) -> impl Iterator<Item = &'a Question> {
        self.questions.iter().filter(move |q| q.dimension == dimension)
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn sub_test_of(&self, dimension: &str) -> Option<&str> {
        self.questions
            .iter()
            .find(|q| q.dimension == dimension)
            .and_then(|q| q.sub_test.as_deref())
    }

    /// Check the structural rules every test definition must satisfy.
    pub fn validate(&self) -> Result<(), ScoringError> {
        let invalid = |reason: String| ScoringError::InvalidDefinition {
            test_id: self.id.clone(),
            reason,
        };

        if self.scale.min >= self.scale.max {
            return Err(invalid(format!(
                "scale min {} must be below max {}",
                self.scale.min, self.scale.max
            )));
        }
        if self.questions.is_empty() {
            return Err(invalid("no questions defined".to_string()));
        }

        let mut ids = HashSet::new();
        for q in &self.questions {
            if q.dimension.trim().is_empty() {
                return Err(invalid(format!("question '{}' has no dimension", q.id)));
            }
            if !ids.insert(q.id.as_str()) {
                return Err(invalid(format!("duplicate question id '{}'", q.id)));
            }
        }

        let known_sub_tests: HashSet<&str> = self.sub_tests.iter().map(|s| s.id.as_str()).collect();
        for dimension in self.dimensions() {
            let sub_test = self.sub_test_of(dimension);
            if self.questions_in(dimension).any(|q| q.sub_test.as_deref() != sub_test) {
                return Err(invalid(format!(
                    "dimension '{dimension}' spans more than one sub-test"
                )));
            }
            match sub_test {
                Some(s) if !known_sub_tests.contains(s) => {
                    return Err(invalid(format!("dimension '{dimension}' uses unknown sub-test '{s}'")));
                }
                None if !self.sub_tests.is_empty() => {
                    return Err(invalid(format!("dimension '{dimension}' has no sub-test")));
                }
                _ => {}
            }
        }

        if self.overall_convention == OverallConvention::MeanOfSubTests && self.sub_tests.is_empty() {
            return Err(invalid("mean_of_sub_tests requires sub-tests".to_string()));
        }

        self.dimension_bands
            .check()
            .map_err(|e| invalid(format!("dimension bands: {e}")))?;
        self.overall_bands
            .check()
            .map_err(|e| invalid(format!("overall bands: {e}")))?;

        Ok(())
    }
}

/// A per-answer problem reported by batch validation.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub question_id: String,
    pub value: u8,
    pub expected_range: LikertScale,
    pub message: String,
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
