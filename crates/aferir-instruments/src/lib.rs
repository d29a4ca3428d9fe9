//! aferir-instruments
//!
//! Questionnaire definitions and the shared scoring engine. Pure data and
//! pure computation, no I/O. Each test is a declarative
//! [`scoring::TestDefinition`]; one engine aggregates, normalizes and
//! classifies every test.

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod instruments;
pub mod scoring;
pub mod session;
pub mod source;

use aferir_core::models::answer::Answer;
use aferir_core::models::result::TestResult;

use error::ScoringError;
use scoring::{TestDefinition, ValidationError};

/// Trait implemented by each questionnaire.
pub trait Instrument: Send + Sync {
    /// The declarative definition consumed by the engine.
    fn definition(&self) -> &TestDefinition;

    /// Unique identifier for this test (e.g., "disc", "clima").
    fn id(&self) -> &str {
        &self.definition().id
    }

    /// Human-readable name (e.g., "DISC", "Clima Organizacional").
    fn name(&self) -> &str {
        &self.definition().name
    }

    fn description(&self) -> &str {
        &self.definition().description
    }

    /// Validate a batch of answers, reporting every problem at once.
    fn validate_answers(&self, answers: &[Answer]) -> Vec<ValidationError> {
        let definition = self.definition();
        let mut errors = Vec::new();
        for answer in answers {
            if definition.question(&answer.question_id).is_none() {
                errors.push(ValidationError {
                    question_id: answer.question_id.clone(),
                    value: answer.value,
                    expected_range: definition.scale,
                    message: format!("{}: unknown question '{}'", self.name(), answer.question_id),
                });
            } else if !definition.scale.contains(answer.value) {
                errors.push(ValidationError {
                    question_id: answer.question_id.clone(),
                    value: answer.value,
                    expected_range: definition.scale,
                    message: format!(
                        "{}: answer {} to '{}' is outside range [{}, {}]",
                        self.name(),
                        answer.value,
                        answer.question_id,
                        definition.scale.min,
                        definition.scale.max,
                    ),
                });
            }
        }
        errors
    }

    /// Format a result as structured text for inclusion in a narrative prompt.
    fn to_structured_input(&self, result: &TestResult) -> String {
        let mut output = format!("## {}\n\n", self.name());
        output.push_str(&format!(
            "Resultado geral: {} ({})\n",
            result.overall_score, result.overall_classification.label
        ));
        if let Some(primary) = &result.primary_dimension {
            output.push_str(&format!("Dimensão predominante: {primary}\n"));
        }
        output.push('\n');

        for sub_test in &result.sub_test_scores {
            output.push_str(&format!(
                "- Subteste {}: {} ({})\n",
                sub_test.sub_test, sub_test.score, sub_test.classification.label
            ));
        }
        if !result.sub_test_scores.is_empty() {
            output.push('\n');
        }

        output.push_str("### Dimensões\n");
        for dimension in &result.dimension_scores {
            match dimension.index {
                Some(index) => output.push_str(&format!(
                    "- {}: média {} / índice {} ({})\n",
                    dimension.dimension, dimension.normalized_score, index, dimension.classification.label
                )),
                None => output.push_str(&format!(
                    "- {}: {} ({})\n",
                    dimension.dimension, dimension.normalized_score, dimension.classification.label
                )),
            }
        }
        output
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::disc::Disc),
        Box::new(instruments::flex::Flex),
        Box::new(instruments::motiva::Motiva),
        Box::new(instruments::valores::Valores),
        Box::new(instruments::bolie::Bolie),
        Box::new(instruments::clima::Clima),
        Box::new(instruments::ie::InteligenciaEmocional),
    ]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}

/// Look up an instrument and check its definition before it is used.
pub fn load_instrument(id: &str) -> Result<Box<dyn Instrument>, ScoringError> {
    let instrument = get_instrument(id).ok_or_else(|| ScoringError::UnknownTest(id.to_string()))?;
    instrument.definition().validate()?;
    Ok(instrument)
}
