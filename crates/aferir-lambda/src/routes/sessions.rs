use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use aferir_bedrock::generator::NarrativeGenerator;
use aferir_core::models::answer::Answer;
use aferir_core::models::narrative::SessionNarrative;
use aferir_core::models::result::{DimensionProgress, TestResult};
use aferir_core::models::session::{SessionRecord, SessionStatus};
use aferir_instruments::load_instrument;
use aferir_instruments::session::Session;
use aferir_storage::state::Versioned;
use aferir_storage::store::SessionStore;

use crate::error::ApiError;
use crate::state::AppState;
use crate::workflow::{self, CompletionOutcome};

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub test_id: String,
    pub respondent_id: String,
}

#[derive(Deserialize)]
pub struct AnswerValue {
    pub value: u8,
}

#[derive(Deserialize)]
pub struct AnswerBatch {
    pub answers: Vec<Answer>,
}

#[derive(Serialize)]
pub struct AnswerResponse {
    session: SessionRecord,
    progress: Vec<DimensionProgress>,
}

#[derive(Serialize)]
pub struct ProgressView {
    session_id: Uuid,
    status: SessionStatus,
    answered: u32,
    expected: u32,
    dimensions: Vec<DimensionProgress>,
}

#[derive(Deserialize, Default)]
pub struct CompleteParams {
    #[serde(default)]
    pub narrative: bool,
}

#[derive(Serialize)]
pub struct ResultView {
    session: SessionRecord,
    result: TestResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    narrative: Option<SessionNarrative>,
}

/// Company ids become key prefixes, so they must be a single path segment.
fn check_company_id(company_id: &str) -> Result<(), ApiError> {
    if company_id.is_empty() || company_id.contains('/') || company_id == "." || company_id == ".." {
        return Err(ApiError::BadRequest(format!("invalid company id: {company_id:?}")));
    }
    Ok(())
}

/// Start a session: the respondent sees the first question right away.
pub async fn create_session<S: SessionStore, N>(
    State(state): State<AppState<S, N>>,
    Path(company_id): Path<String>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionRecord>), ApiError> {
    check_company_id(&company_id)?;
    let respondent_id = req.respondent_id.trim();
    if respondent_id.is_empty() {
        return Err(ApiError::BadRequest("respondent_id is required".to_string()));
    }

    let instrument = load_instrument(&req.test_id)?;
    let now = jiff::Timestamp::now();
    let record = SessionRecord::new(&company_id, respondent_id, instrument.id(), now);
    let mut session = Session::resume(instrument.definition(), record)?;
    session.start(now)?;

    state.store.create(session.record()).await?;
    info!(
        session_id = %session.record().id,
        company_id = %company_id,
        test_id = %instrument.id(),
        "session started"
    );

    Ok((StatusCode::CREATED, Json(session.into_record())))
}

pub async fn list_sessions<S: SessionStore, N>(
    State(state): State<AppState<S, N>>,
    Path(company_id): Path<String>,
) -> Result<Json<Vec<SessionRecord>>, ApiError> {
    check_company_id(&company_id)?;
    let mut sessions = state.store.list(&company_id).await?;
    sessions.sort_by_key(|s| s.created_at);
    Ok(Json(sessions))
}

pub async fn get_session<S: SessionStore, N>(
    State(state): State<AppState<S, N>>,
    Path((company_id, id)): Path<(String, Uuid)>,
) -> Result<Json<SessionRecord>, ApiError> {
    check_company_id(&company_id)?;
    Ok(Json(state.store.load(&company_id, id).await?.value))
}

/// Record or overwrite one answer.
pub async fn record_answer<S: SessionStore, N>(
    State(state): State<AppState<S, N>>,
    Path((company_id, id, question_id)): Path<(String, Uuid, String)>,
    Json(body): Json<AnswerValue>,
) -> Result<Json<AnswerResponse>, ApiError> {
    check_company_id(&company_id)?;
    let Versioned { value: record, etag } = state.store.load(&company_id, id).await?;
    let instrument = load_instrument(&record.test_id)?;

    let mut session = Session::resume(instrument.definition(), record)?;
    session.record_answer(&question_id, body.value, jiff::Timestamp::now())?;
    state.store.save_progress(session.record(), &etag).await?;

    let progress = session.progress();
    Ok(Json(AnswerResponse {
        session: session.into_record(),
        progress,
    }))
}

/// Record several answers at once. Nothing is recorded unless every
/// answer is valid; all problems are reported together.
pub async fn record_answers<S: SessionStore, N>(
    State(state): State<AppState<S, N>>,
    Path((company_id, id)): Path<(String, Uuid)>,
    Json(batch): Json<AnswerBatch>,
) -> Result<Json<AnswerResponse>, ApiError> {
    check_company_id(&company_id)?;
    let Versioned { value: record, etag } = state.store.load(&company_id, id).await?;
    let instrument = load_instrument(&record.test_id)?;

    let errors = instrument.validate_answers(&batch.answers);
    if !errors.is_empty() {
        warn!(session_id = %id, rejected = errors.len(), "answer batch rejected");
        return Err(ApiError::invalid_answers(errors));
    }

    let now = jiff::Timestamp::now();
    let mut session = Session::resume(instrument.definition(), record)?;
    for answer in &batch.answers {
        session.record_answer(&answer.question_id, answer.value, now)?;
    }
    state.store.save_progress(session.record(), &etag).await?;

    let progress = session.progress();
    Ok(Json(AnswerResponse {
        session: session.into_record(),
        progress,
    }))
}

pub async fn get_progress<S: SessionStore, N>(
    State(state): State<AppState<S, N>>,
    Path((company_id, id)): Path<(String, Uuid)>,
) -> Result<Json<ProgressView>, ApiError> {
    check_company_id(&company_id)?;
    let record = state.store.load(&company_id, id).await?.value;
    let instrument = load_instrument(&record.test_id)?;
    let session = Session::resume(instrument.definition(), record)?;

    let dimensions = session.progress();
    Ok(Json(ProgressView {
        session_id: id,
        status: session.status(),
        answered: dimensions.iter().map(|d| d.answered).sum(),
        expected: dimensions.iter().map(|d| d.expected).sum(),
        dimensions,
    }))
}

/// Complete, score and persist. `?narrative=true` also requests a report.
pub async fn complete_session<S: SessionStore, N: NarrativeGenerator>(
    State(state): State<AppState<S, N>>,
    Path((company_id, id)): Path<(String, Uuid)>,
    Query(params): Query<CompleteParams>,
) -> Result<Json<CompletionOutcome>, ApiError> {
    check_company_id(&company_id)?;
    let outcome =
        workflow::complete_session(&state, &company_id, id, params.narrative, jiff::Timestamp::now()).await?;
    Ok(Json(outcome))
}

pub async fn get_result<S: SessionStore, N>(
    State(state): State<AppState<S, N>>,
    Path((company_id, id)): Path<(String, Uuid)>,
) -> Result<Json<ResultView>, ApiError> {
    check_company_id(&company_id)?;
    let scored = state.store.load_result(&company_id, id).await?;
    let narrative = match state.store.load_narrative(&company_id, id).await {
        Ok(narrative) => narrative,
        Err(e) => {
            warn!(session_id = %id, error = %e, "stored narrative could not be read");
            None
        }
    };

    Ok(Json(ResultView {
        session: scored.session,
        result: scored.result,
        narrative,
    }))
}
