//! Session completion: score, persist, optionally narrate.
//!
//! Once a result is computed it is always returned. Persistence and
//! narrative failures after that point become warnings on the outcome.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use aferir_bedrock::generator::NarrativeGenerator;
use aferir_bedrock::prompt;
use aferir_core::models::narrative::SessionNarrative;
use aferir_core::models::result::TestResult;
use aferir_core::models::session::{ScoredSession, SessionRecord, SessionStatus};
use aferir_core::models::transaction::NarrativeTransaction;
use aferir_instruments::scoring::TestDefinition;
use aferir_instruments::session::Session;
use aferir_instruments::{load_instrument, Instrument};
use aferir_storage::error::StorageError;
use aferir_storage::state::Versioned;
use aferir_storage::store::SessionStore;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CompletionOutcome {
    pub session: SessionRecord,
    pub result: TestResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<SessionNarrative>,
    pub warnings: Vec<String>,
}

/// Complete and score a session.
///
/// Completing a session that already has a stored result returns that
/// result unchanged. A scored session whose result was never stored is
/// scored again and the save retried.
pub async fn complete_session<S, N>(
    state: &AppState<S, N>,
    company_id: &str,
    id: Uuid,
    with_narrative: bool,
    now: jiff::Timestamp,
) -> Result<CompletionOutcome, ApiError>
where
    S: SessionStore,
    N: NarrativeGenerator,
{
    let Versioned { value: record, etag } = state.store.load(company_id, id).await?;
    let instrument = load_instrument(&record.test_id)?;
    let mut warnings = Vec::new();

    let (session, result) = if record.status.is_scored() {
        match state.store.load_result(company_id, id).await {
            Ok(scored) => {
                info!(session_id = %id, "session already scored, returning stored result");
                (record, scored.result)
            }
            Err(StorageError::NotFound { .. }) => {
                warn!(session_id = %id, "scored session has no stored result, scoring again");
                score_and_persist(state.store.as_ref(), instrument.definition(), record, &etag, now, &mut warnings)
                    .await?
            }
            Err(e) => return Err(e.into()),
        }
    } else {
        score_and_persist(state.store.as_ref(), instrument.definition(), record, &etag, now, &mut warnings).await?
    };

    let narrative = if with_narrative {
        narrate(state, instrument.as_ref(), &session, &result, now, &mut warnings).await
    } else {
        None
    };

    Ok(CompletionOutcome {
        session,
        result,
        narrative,
        warnings,
    })
}

async fn score_and_persist<S: SessionStore>(
    store: &S,
    definition: &TestDefinition,
    record: SessionRecord,
    etag: &str,
    now: jiff::Timestamp,
    warnings: &mut Vec<String>,
) -> Result<(SessionRecord, TestResult), ApiError> {
    let mut session = Session::resume(definition, record)?;
    if session.status() < SessionStatus::Completed {
        // A session closes at its last recorded answer, so every retry of a
        // completion computes the same result.
        let closed_at = session.record().updated_at;
        session.complete(closed_at)?;
    }
    let result = session.score()?;

    let record = session.record();
    info!(
        session_id = %record.id,
        company_id = %record.company_id,
        test_id = %record.test_id,
        overall_score = result.overall_score,
        classification = %result.overall_classification.label,
        "session scored"
    );

    // The scored session goes first so answers are frozen before the result exists.
    let session_saved = store.save_progress(record, etag).await;

    let scored = ScoredSession {
        session: record.clone(),
        result: result.clone(),
    };
    let result_saved = match store.save_result(&scored).await {
        Ok(()) => true,
        Err(StorageError::AlreadyExists { .. }) => {
            // Another completion of the same session won the write.
            info!(session_id = %scored.session.id, "result already stored, returning it");
            let stored = store.load_result(&scored.session.company_id, scored.session.id).await?;
            return Ok((stored.session, stored.result));
        }
        Err(e) => {
            warn!(session_id = %scored.session.id, error = %e, "result could not be saved");
            warnings.push(format!("result could not be saved: {e}"));
            false
        }
    };

    let etag = match session_saved {
        Ok(etag) => etag,
        Err(e) => {
            warn!(session_id = %scored.session.id, error = %e, "session status could not be saved");
            warnings.push(format!("session status could not be saved: {e}"));
            return Ok((session.into_record(), result));
        }
    };

    if result_saved {
        session.mark_persisted(now)?;
        if let Err(e) = store.save_progress(session.record(), &etag).await {
            warn!(session_id = %scored.session.id, error = %e, "session status could not be saved");
            warnings.push(format!("session status could not be saved: {e}"));
        }
    }

    Ok((session.into_record(), result))
}

async fn narrate<S, N>(
    state: &AppState<S, N>,
    instrument: &dyn Instrument,
    session: &SessionRecord,
    result: &TestResult,
    now: jiff::Timestamp,
    warnings: &mut Vec<String>,
) -> Option<SessionNarrative>
where
    S: SessionStore,
    N: NarrativeGenerator,
{
    match state.store.load_narrative(&session.company_id, session.id).await {
        Ok(Some(existing)) => return Some(existing),
        Ok(None) => {}
        Err(e) => warn!(session_id = %session.id, error = %e, "stored narrative could not be read"),
    }

    let Some(narrator) = state.narrator.as_deref() else {
        warnings.push("narrative generation is not configured".to_string());
        return None;
    };

    let block = prompt::build_result_block(instrument.name(), &instrument.to_structured_input(result));
    let message = prompt::build_user_message(&block);

    let generated = match narrator.generate(&state.system_prompt, &message).await {
        Ok(generated) => generated,
        Err(e) => {
            warn!(session_id = %session.id, model = narrator.model_id(), error = %e, "narrative generation failed");
            warnings.push(format!("narrative could not be generated: {e}"));

            let failed = NarrativeTransaction::failed(session.id, narrator.model_id(), e.to_string(), now);
            if let Err(e) = state.store.save_transaction(&session.company_id, &failed).await {
                warn!(transaction_id = %failed.id, error = %e, "failed transaction could not be saved");
            }
            return None;
        }
    };

    let (narrative, transaction) = generated.into_records(session.id, now);
    info!(
        session_id = %session.id,
        transaction_id = %transaction.id,
        model = %transaction.model_id,
        cost_usd = transaction.usage.cost_usd,
        "narrative generated"
    );

    if let Err(e) = state.store.save_narrative(&session.company_id, &narrative, &transaction).await {
        warn!(session_id = %session.id, error = %e, "narrative could not be saved");
        warnings.push(format!("narrative could not be saved: {e}"));
    }
    Some(narrative)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use aferir_bedrock::error::NarrativeError;
    use aferir_bedrock::narrative::{parse_narrative, TransactionResult};
    use aferir_core::models::narrative::Narrative;
    use aferir_core::models::token_count::TokenUsage;
    use aferir_core::models::transaction::TransactionStatus;
    use aferir_instruments::get_instrument;
    use aferir_storage::memory::MemorySessionStore;

    use super::*;

    /// Replies with a fixed model response and records every prompt.
    pub(crate) struct ScriptedNarrator {
        reply: Result<String, String>,
        pub(crate) prompts: Mutex<Vec<String>>,
    }

    impl ScriptedNarrator {
        pub(crate) fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl NarrativeGenerator for ScriptedNarrator {
        fn model_id(&self) -> &str {
            "scripted"
        }

        async fn generate(
            &self,
            _system_prompt: &str,
            user_message: &str,
        ) -> Result<TransactionResult<Narrative>, NarrativeError> {
            self.prompts.lock().unwrap().push(user_message.to_string());
            let text = self.reply.clone().map_err(NarrativeError::Invocation)?;
            Ok(TransactionResult {
                id: Uuid::new_v4(),
                model_id: "scripted".to_string(),
                usage: TokenUsage::default(),
                status: TransactionStatus::Complete,
                output: parse_narrative(&text)?,
            })
        }
    }

    pub(crate) type TestState = AppState<MemorySessionStore, ScriptedNarrator>;

    fn at(seconds: i64) -> jiff::Timestamp {
        jiff::Timestamp::from_second(1_740_830_400 + seconds).unwrap()
    }

    fn state(narrator: Option<ScriptedNarrator>) -> TestState {
        AppState::new(MemorySessionStore::new(), narrator, "prompt")
    }

    /// A started FLEX session with every question answered 3.
    async fn answered_flex(state: &TestState) -> SessionRecord {
        let instrument = get_instrument("flex").unwrap();
        let mut session =
            Session::resume(instrument.definition(), SessionRecord::new("acme", "resp-1", "flex", at(0))).unwrap();
        session.start(at(0)).unwrap();
        for question in &instrument.definition().questions {
            session.record_answer(&question.id, 3, at(300)).unwrap();
        }
        let record = session.into_record();
        state.store.create(&record).await.unwrap();
        record
    }

    #[tokio::test]
    async fn completion_scores_and_persists() {
        let state = state(None);
        let record = answered_flex(&state).await;

        let outcome = complete_session(&state, "acme", record.id, false, at(300)).await.unwrap();

        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.result.raw_total, 72);
        assert_eq!(outcome.result.overall_classification.label, "Adaptabilidade moderada");
        assert_eq!(outcome.result.duration_seconds, Some(300));
        assert_eq!(outcome.session.status, SessionStatus::Persisted);

        let stored = state.store.load("acme", record.id).await.unwrap();
        assert_eq!(stored.value.status, SessionStatus::Persisted);
        let scored = state.store.load_result("acme", record.id).await.unwrap();
        assert_eq!(scored.result, outcome.result);
        assert_eq!(scored.session.answers, record.answers);
    }

    #[tokio::test]
    async fn second_completion_returns_stored_result() {
        let state = state(None);
        let record = answered_flex(&state).await;

        let first = complete_session(&state, "acme", record.id, false, at(300)).await.unwrap();
        let second = complete_session(&state, "acme", record.id, false, at(900)).await.unwrap();

        assert_eq!(first.result, second.result);
        assert_eq!(second.result.completed_at, Some(at(300)));
        assert!(second.warnings.is_empty());
    }

    #[tokio::test]
    async fn incomplete_session_is_rejected_before_anything_is_saved() {
        let state = state(None);
        let instrument = get_instrument("flex").unwrap();
        let mut session =
            Session::resume(instrument.definition(), SessionRecord::new("acme", "resp-1", "flex", at(0))).unwrap();
        session.start(at(0)).unwrap();
        session.record_answer("fc01", 4, at(10)).unwrap();
        let record = session.into_record();
        state.store.create(&record).await.unwrap();

        let err = complete_session(&state, "acme", record.id, false, at(300)).await.unwrap_err();

        let missing = match err {
            ApiError::Unprocessable { details, .. } => details.unwrap(),
            other => panic!("expected 422, got {other:?}"),
        };
        assert_eq!(missing.as_array().unwrap().len(), 4);
        assert_eq!(missing[0]["dimension"], "Flexibilidade Cognitiva");
        assert_eq!(missing[0]["question_ids"].as_array().unwrap().len(), 5);

        assert!(state.store.load_result("acme", record.id).await.is_err());
        let stored = state.store.load("acme", record.id).await.unwrap();
        assert_eq!(stored.value.status, SessionStatus::InProgress);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let state = state(None);
        let err = complete_session(&state, "acme", Uuid::new_v4(), false, at(0)).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn save_failure_still_returns_result_and_retry_persists() {
        let state = state(None);
        let record = answered_flex(&state).await;

        state.store.set_unavailable(true);
        let outcome = complete_session(&state, "acme", record.id, false, at(300)).await.unwrap();
        assert_eq!(outcome.result.raw_total, 72);
        assert_eq!(outcome.session.status, SessionStatus::Scored);
        assert_eq!(outcome.warnings.len(), 2);
        assert!(outcome.warnings[0].starts_with("result could not be saved"));

        state.store.set_unavailable(false);
        let retried = complete_session(&state, "acme", record.id, false, at(400)).await.unwrap();
        assert!(retried.warnings.is_empty());
        assert_eq!(retried.session.status, SessionStatus::Persisted);
        assert_eq!(retried.result, outcome.result);
        assert_eq!(retried.result.completed_at, Some(at(300)));

        let stored = state.store.load_result("acme", record.id).await.unwrap();
        assert_eq!(stored.result, outcome.result);
    }

    #[tokio::test]
    async fn scored_session_without_result_is_scored_again() {
        let state = state(None);
        let instrument = get_instrument("flex").unwrap();
        let mut record = SessionRecord::new("acme", "resp-1", "flex", at(0));
        for question in &instrument.definition().questions {
            record.answers.insert(question.id.clone(), 5);
        }
        record.status = SessionStatus::Scored;
        record.started_at = Some(at(0));
        record.completed_at = Some(at(120));
        state.store.create(&record).await.unwrap();

        let outcome = complete_session(&state, "acme", record.id, false, at(600)).await.unwrap();

        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.result.raw_total, 116);
        assert_eq!(outcome.result.completed_at, Some(at(120)));
        assert_eq!(outcome.session.status, SessionStatus::Persisted);
    }

    #[tokio::test]
    async fn narrative_is_generated_from_the_result_and_stored() {
        let state = state(Some(ScriptedNarrator::replying(
            r#"{"summary": "Adaptabilidade moderada.", "strengths": ["Resiliência"]}"#,
        )));
        let record = answered_flex(&state).await;

        let outcome = complete_session(&state, "acme", record.id, true, at(300)).await.unwrap();

        assert!(outcome.warnings.is_empty());
        let narrative = outcome.narrative.unwrap();
        assert_eq!(narrative.narrative.summary, "Adaptabilidade moderada.");

        let prompts = state.narrator.as_ref().unwrap().prompts.lock().unwrap().clone();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("<test_result name=\"FLEX\">"));
        assert!(prompts[0].contains("Adaptabilidade moderada"));
        assert!(!prompts[0].contains("resp-1"));

        let stored = state.store.load_narrative("acme", record.id).await.unwrap().unwrap();
        assert_eq!(stored.transaction_id, narrative.transaction_id);

        // Asking again reuses the stored narrative.
        complete_session(&state, "acme", record.id, true, at(400)).await.unwrap();
        assert_eq!(state.narrator.as_ref().unwrap().prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn narrative_failure_is_a_warning() {
        let state = state(Some(ScriptedNarrator::failing("throttled")));
        let record = answered_flex(&state).await;

        let outcome = complete_session(&state, "acme", record.id, true, at(300)).await.unwrap();

        assert!(outcome.narrative.is_none());
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("throttled"));
        assert_eq!(outcome.session.status, SessionStatus::Persisted);

        let transactions = state.store.keys_under("companies/acme/transactions/").await;
        assert_eq!(transactions.len(), 1);
        assert!(state.store.load_narrative("acme", record.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn narrative_without_generator_is_a_warning() {
        let state = state(None);
        let record = answered_flex(&state).await;

        let outcome = complete_session(&state, "acme", record.id, true, at(300)).await.unwrap();

        assert!(outcome.narrative.is_none());
        assert_eq!(outcome.warnings, vec!["narrative generation is not configured".to_string()]);
    }
}
