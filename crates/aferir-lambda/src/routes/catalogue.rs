use axum::extract::Path;
use axum::Json;
use serde::Serialize;

use aferir_instruments::scoring::{LikertScale, SubTest};
use aferir_instruments::source::{QuestionSource, StaticQuestionSource};
use aferir_instruments::{all_instruments, load_instrument};

use crate::error::ApiError;

#[derive(Serialize)]
pub struct TestSummary {
    id: String,
    name: String,
    description: String,
    question_count: usize,
}

#[derive(Serialize)]
pub struct DimensionSummary {
    dimension: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sub_test: Option<String>,
    question_count: u32,
}

/// A question as shown to respondents. Whether it is scored in reverse is
/// not exposed.
#[derive(Serialize)]
pub struct QuestionView {
    id: String,
    text: String,
    dimension: String,
}

#[derive(Serialize)]
pub struct TestDetail {
    id: String,
    name: String,
    description: String,
    scale: LikertScale,
    sub_tests: Vec<SubTest>,
    dimensions: Vec<DimensionSummary>,
    questions: Vec<QuestionView>,
}

pub async fn list_tests() -> Json<Vec<TestSummary>> {
    let tests = all_instruments()
        .iter()
        .map(|i| TestSummary {
            id: i.id().to_string(),
            name: i.name().to_string(),
            description: i.description().to_string(),
            question_count: i.definition().questions.len(),
        })
        .collect();
    Json(tests)
}

pub async fn get_test_detail(Path(id): Path<String>) -> Result<Json<TestDetail>, ApiError> {
    let instrument = load_instrument(&id)?;
    let definition = instrument.definition();
    let questions = StaticQuestionSource.questions(&id)?;

    Ok(Json(TestDetail {
        id: definition.id.clone(),
        name: definition.name.clone(),
        description: definition.description.clone(),
        scale: definition.scale,
        sub_tests: definition.sub_tests.clone(),
        dimensions: definition
            .dimension_question_counts()
            .into_iter()
            .map(|(dimension, question_count)| DimensionSummary {
                dimension: dimension.to_string(),
                sub_test: definition.sub_test_of(dimension).map(str::to_string),
                question_count,
            })
            .collect(),
        questions: questions
            .into_iter()
            .map(|q| QuestionView {
                id: q.id,
                text: q.text,
                dimension: q.dimension,
            })
            .collect(),
    }))
}
