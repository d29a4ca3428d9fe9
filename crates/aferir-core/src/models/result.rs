use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A qualitative band assigned to a score.
///
/// `tier` counts upward from the lowest band of the table (0), so a higher
/// tier always means a better-ranked band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Classification {
    pub label: String,
    pub tier: u32,
}

/// Derived score for one dimension of one completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DimensionScore {
    pub dimension: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_test: Option<String>,
    pub question_count: u32,
    /// Sum of the (reversal-adjusted) answer values.
    pub raw_sum: u32,
    /// Sum or mean, depending on the test's dimension convention.
    pub raw_aggregate: f64,
    /// The dimension's presentation score (0–100, scale mean, or capped sum).
    pub normalized_score: f64,
    /// Secondary 0–100 index for mean-convention tests that rescale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<f64>,
    pub classification: Classification,
}

impl DimensionScore {
    /// The value that was classified and that feeds dimension roll-ups.
    pub fn scored_value(&self) -> f64 {
        self.index.unwrap_or(self.normalized_score)
    }
}

/// Aggregate for one sub-instrument of a composite test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubTestScore {
    pub sub_test: String,
    pub score: f64,
    pub classification: Classification,
}

/// The outcome of one completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TestResult {
    pub test_id: String,
    pub overall_score: f64,
    pub overall_classification: Classification,
    /// Sum of every (reversal-adjusted) answer in the test.
    pub raw_total: u32,
    pub dimension_scores: Vec<DimensionScore>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_test_scores: Vec<SubTestScore>,
    pub primary_dimension: Option<String>,
    pub duration_seconds: Option<i64>,
    pub completed_at: Option<jiff::Timestamp>,
}

impl TestResult {
    pub fn dimension(&self, label: &str) -> Option<&DimensionScore> {
        self.dimension_scores.iter().find(|d| d.dimension == label)
    }

    pub fn sub_test(&self, label: &str) -> Option<&SubTestScore> {
        self.sub_test_scores.iter().find(|s| s.sub_test == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DimensionStatus {
    Complete,
    Incomplete,
}

/// Answer coverage of a dimension while a session is in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DimensionProgress {
    pub dimension: String,
    pub answered: u32,
    pub expected: u32,
    pub status: DimensionStatus,
}
