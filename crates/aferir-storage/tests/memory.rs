use std::collections::HashMap;

use aferir_core::keys;
use aferir_core::models::narrative::{Narrative, SessionNarrative};
use aferir_core::models::result::{Classification, TestResult};
use aferir_core::models::session::{ScoredSession, SessionRecord, SessionStatus};
use aferir_core::models::token_count::TokenUsage;
use aferir_core::models::transaction::{NarrativeTransaction, TransactionStatus};
use aferir_storage::error::StorageError;
use aferir_storage::memory::MemorySessionStore;
use aferir_storage::store::SessionStore;
use uuid::Uuid;

fn now() -> jiff::Timestamp {
    "2025-03-01T12:00:00Z".parse().unwrap()
}

fn record(company: &str) -> SessionRecord {
    SessionRecord::new(company, "resp-1", "flex", now())
}

fn scored(record: &SessionRecord) -> ScoredSession {
    ScoredSession {
        session: record.clone(),
        result: TestResult {
            test_id: record.test_id.clone(),
            overall_score: 3.0,
            overall_classification: Classification {
                label: "Adaptabilidade moderada".to_string(),
                tier: 1,
            },
            raw_total: 72,
            dimension_scores: vec![],
            sub_test_scores: vec![],
            primary_dimension: None,
            duration_seconds: None,
            completed_at: None,
        },
    }
}

#[tokio::test]
async fn create_then_load_round_trips_with_etag() {
    let store = MemorySessionStore::new();
    let session = record("acme");

    let etag = store.create(&session).await.unwrap();
    let loaded = store.load("acme", session.id).await.unwrap();

    assert_eq!(loaded.value, session);
    assert_eq!(loaded.etag, etag);
}

#[tokio::test]
async fn create_rejects_duplicate_id() {
    let store = MemorySessionStore::new();
    let session = record("acme");
    store.create(&session).await.unwrap();

    let err = store.create(&session).await.unwrap_err();
    assert!(matches!(err, StorageError::AlreadyExists { .. }));
}

#[tokio::test]
async fn load_missing_session_is_not_found() {
    let store = MemorySessionStore::new();
    let err = store.load("acme", Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[tokio::test]
async fn save_progress_requires_current_etag() {
    let store = MemorySessionStore::new();
    let mut session = record("acme");
    let first = store.create(&session).await.unwrap();

    session.status = SessionStatus::InProgress;
    session.answers.insert("fc01".to_string(), 4);
    let second = store.save_progress(&session, &first).await.unwrap();
    assert_ne!(first, second);

    // A writer still holding the first ETag loses.
    let err = store.save_progress(&session, &first).await.unwrap_err();
    assert!(matches!(err, StorageError::PreconditionFailed { .. }));

    let loaded = store.load("acme", session.id).await.unwrap();
    assert_eq!(loaded.value.answers.get("fc01"), Some(&4));
}

#[tokio::test]
async fn result_is_written_once() {
    let store = MemorySessionStore::new();
    let session = record("acme");
    let outcome = scored(&session);

    store.save_result(&outcome).await.unwrap();
    let err = store.save_result(&outcome).await.unwrap_err();
    assert!(matches!(err, StorageError::AlreadyExists { .. }));

    let loaded = store.load_result("acme", session.id).await.unwrap();
    assert_eq!(loaded, outcome);
}

#[tokio::test]
async fn list_returns_only_session_documents_of_one_company() {
    let store = MemorySessionStore::new();
    let a = record("acme");
    let b = record("acme");
    let other = record("globex");

    store.create(&a).await.unwrap();
    store.create(&b).await.unwrap();
    store.create(&other).await.unwrap();
    store.save_result(&scored(&a)).await.unwrap();

    let mut ids: Vec<Uuid> = store.list("acme").await.unwrap().into_iter().map(|s| s.id).collect();
    ids.sort();
    let mut expected = vec![a.id, b.id];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn list_skips_stray_objects_under_the_sessions_prefix() {
    let store = MemorySessionStore::new();
    let session = record("acme");
    store.create(&session).await.unwrap();

    store.put_raw("companies/acme/sessions/notauuid/session.json", "{}").await;
    store.put_raw("companies/acme/sessions/stray.json", "{}").await;
    store
        .put_raw(keys::session("acme", Uuid::new_v4()), "not json")
        .await;

    let sessions = store.list("acme").await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id, session.id);
}

#[tokio::test]
async fn narrative_and_transaction_are_stored_under_company() {
    let store = MemorySessionStore::new();
    let session = record("acme");
    assert!(store.load_narrative("acme", session.id).await.unwrap().is_none());

    let transaction = NarrativeTransaction {
        id: Uuid::new_v4(),
        session_id: session.id,
        model_id: "test-model".to_string(),
        usage: TokenUsage::default(),
        status: TransactionStatus::Complete,
        error: None,
        created_at: now(),
    };
    let narrative = SessionNarrative {
        session_id: session.id,
        transaction_id: transaction.id,
        narrative: Narrative {
            summary: "Perfil adaptável.".to_string(),
            strengths: vec!["Resiliência".to_string()],
            development_areas: vec![],
            recommendations: vec![],
            custom_sections: HashMap::new(),
        },
        created_at: now(),
    };

    store.save_narrative("acme", &narrative, &transaction).await.unwrap();

    let loaded = store.load_narrative("acme", session.id).await.unwrap().unwrap();
    assert_eq!(loaded.narrative, narrative.narrative);
    let transactions = store.keys_under("companies/acme/transactions/").await;
    assert_eq!(transactions, vec![keys::narrative_transaction("acme", transaction.id)]);
}

#[tokio::test]
async fn unavailable_store_rejects_writes_but_serves_reads() {
    let store = MemorySessionStore::new();
    let session = record("acme");
    store.create(&session).await.unwrap();

    store.set_unavailable(true);
    let err = store.save_result(&scored(&session)).await.unwrap_err();
    assert!(matches!(err, StorageError::Unavailable(_)));
    assert!(store.load("acme", session.id).await.is_ok());

    store.set_unavailable(false);
    store.save_result(&scored(&session)).await.unwrap();
}
