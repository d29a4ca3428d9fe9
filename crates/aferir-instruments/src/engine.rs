//! Normalization, classification and result assembly.
//!
//! Pure and deterministic: the same definition and answers always produce
//! the same [`TestResult`]. Session metadata (duration, completion time) is
//! attached by the caller.

use aferir_core::models::result::{DimensionScore, SubTestScore, TestResult};

use crate::aggregate::{group_by_dimension, AnswerSheet, DimensionValues};
use crate::error::ScoringError;
use crate::scoring::{
    round_to, DimensionConvention, OverallBasis, OverallConvention, TestDefinition,
};

/// Score a complete answer sheet.
///
/// Fails with [`ScoringError::IncompleteSubmission`] if any question of the
/// bank is unanswered; no partial result is produced. A definition that
/// does not pass [`TestDefinition::validate`] is rejected first.
pub fn score(definition: &TestDefinition, sheet: &AnswerSheet) -> Result<TestResult, ScoringError> {
    definition.validate()?;

    let missing = sheet.missing(definition);
    if !missing.is_empty() {
        return Err(ScoringError::IncompleteSubmission { missing });
    }

    let groups = group_by_dimension(definition, sheet);
    let dimension_scores: Vec<DimensionScore> = groups
        .iter()
        .map(|group| score_dimension(definition, group))
        .collect();

    let sub_test_scores: Vec<SubTestScore> = definition
        .sub_tests
        .iter()
        .map(|sub_test| {
            let score = mean(
                dimension_scores
                    .iter()
                    .filter(|d| d.sub_test.as_deref() == Some(sub_test.id.as_str()))
                    .map(DimensionScore::scored_value),
            );
            SubTestScore {
                sub_test: sub_test.id.clone(),
                score,
                classification: definition.overall_bands.classify(score),
            }
        })
        .collect();

    let raw_total: u32 = groups.iter().map(DimensionValues::sum).sum();

    let overall_score = match definition.overall_convention {
        OverallConvention::MeanOfDimensions => {
            mean(dimension_scores.iter().map(DimensionScore::scored_value))
        }
        OverallConvention::MeanOfAnswers => mean(
            groups
                .iter()
                .flat_map(|g| g.values.iter())
                .map(|&v| f64::from(v)),
        ),
        OverallConvention::MeanOfSubTests => mean(sub_test_scores.iter().map(|s| s.score)),
    };

    let overall_classification = match definition.overall_basis {
        OverallBasis::OverallScore => definition.overall_bands.classify(overall_score),
        OverallBasis::RawTotal => definition.overall_bands.classify(f64::from(raw_total)),
    };

    Ok(TestResult {
        test_id: definition.id.clone(),
        overall_score,
        overall_classification,
        raw_total,
        primary_dimension: primary_dimension(&dimension_scores),
        dimension_scores,
        sub_test_scores,
        duration_seconds: None,
        completed_at: None,
    })
}

/// Normalize and classify one fully answered dimension.
pub fn score_dimension(definition: &TestDefinition, group: &DimensionValues) -> DimensionScore {
    let scale = definition.scale;
    let raw_sum = group.sum();
    let count = group.values.len().max(1) as f64;
    let mean = f64::from(raw_sum) / count;

    let (raw_aggregate, normalized_score, index) = match definition.dimension_convention {
        DimensionConvention::Percentage => {
            let ceiling = f64::from(group.expected) * f64::from(scale.max);
            let pct = (f64::from(raw_sum) / ceiling * 100.0).round();
            (f64::from(raw_sum), pct, None)
        }
        DimensionConvention::Mean { rescale } => {
            let index = rescale.then(|| {
                round_to(
                    (mean - f64::from(scale.min)) / f64::from(scale.width()) * 100.0,
                    2,
                )
            });
            (round_to(mean, 2), round_to(mean, 2), index)
        }
        DimensionConvention::RawSum => {
            let cap = group.expected * u32::from(scale.max);
            (f64::from(raw_sum), f64::from(raw_sum.min(cap)), None)
        }
    };

    let scored = index.unwrap_or(normalized_score);
    DimensionScore {
        dimension: group.dimension.clone(),
        sub_test: group.sub_test.clone(),
        question_count: group.expected,
        raw_sum,
        raw_aggregate,
        normalized_score,
        index,
        classification: definition.dimension_bands.classify(scored),
    }
}

/// Highest-scoring dimension; the first in bank order wins a tie.
fn primary_dimension(scores: &[DimensionScore]) -> Option<String> {
    let mut best: Option<&DimensionScore> = None;
    for score in scores {
        if best.is_none_or(|b| score.scored_value() > b.scored_value()) {
            best = Some(score);
        }
    }
    best.map(|d| d.dimension.clone())
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        return 0.0;
    }
    round_to(sum / n as f64, 2)
}
