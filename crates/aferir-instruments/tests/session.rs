use aferir_core::models::result::DimensionStatus;
use aferir_core::models::session::{SessionRecord, SessionStatus};
use aferir_instruments::error::ScoringError;
use aferir_instruments::session::Session;
use aferir_instruments::get_instrument;

fn at(s: &str) -> jiff::Timestamp {
    s.parse().unwrap()
}

fn new_record(test_id: &str) -> SessionRecord {
    SessionRecord::new("acme", "resp-1", test_id, at("2026-05-04T09:00:00Z"))
}

#[test]
fn full_lifecycle_produces_a_result_with_timing() {
    let ie = get_instrument("ie").unwrap();
    let definition = ie.definition();
    let mut session = Session::resume(definition, new_record("ie")).unwrap();

    session.start(at("2026-05-04T09:00:00Z")).unwrap();
    assert_eq!(session.status(), SessionStatus::InProgress);

    for q in &definition.questions {
        session.record_answer(&q.id, 3, at("2026-05-04T09:01:00Z")).unwrap();
    }
    session.complete(at("2026-05-04T09:05:00Z")).unwrap();
    assert_eq!(session.status(), SessionStatus::Completed);

    let result = session.score().unwrap();
    assert_eq!(session.status(), SessionStatus::Scored);
    assert_eq!(result.duration_seconds, Some(300));
    assert_eq!(result.completed_at, Some(at("2026-05-04T09:05:00Z")));
    assert_eq!(result.overall_score, 3.0);

    session.mark_persisted(at("2026-05-04T09:05:01Z")).unwrap();
    assert_eq!(session.into_record().status, SessionStatus::Persisted);
}

#[test]
fn answers_are_rejected_before_start() {
    let ie = get_instrument("ie").unwrap();
    let mut session = Session::resume(ie.definition(), new_record("ie")).unwrap();

    let err = session
        .record_answer("ac01", 3, at("2026-05-04T09:01:00Z"))
        .unwrap_err();
    assert!(matches!(
        err,
        ScoringError::InvalidTransition {
            from: SessionStatus::NotStarted,
            ..
        }
    ));
}

#[test]
fn out_of_range_answer_is_rejected_not_clamped() {
    let ie = get_instrument("ie").unwrap();
    let mut session = Session::resume(ie.definition(), new_record("ie")).unwrap();
    session.start(at("2026-05-04T09:00:00Z")).unwrap();

    let err = session
        .record_answer("ac01", 6, at("2026-05-04T09:01:00Z"))
        .unwrap_err();
    assert!(matches!(err, ScoringError::InputValidation { value: 6, .. }));
    assert!(session.record().answers.is_empty());

    let err = session
        .record_answer("zz99", 3, at("2026-05-04T09:01:00Z"))
        .unwrap_err();
    assert!(matches!(err, ScoringError::UnknownQuestion { .. }));
}

#[test]
fn answers_can_be_overwritten() {
    let ie = get_instrument("ie").unwrap();
    let mut session = Session::resume(ie.definition(), new_record("ie")).unwrap();
    session.start(at("2026-05-04T09:00:00Z")).unwrap();

    session.record_answer("ar03", 5, at("2026-05-04T09:01:00Z")).unwrap();
    session.record_answer("ar03", 2, at("2026-05-04T09:02:00Z")).unwrap();

    assert_eq!(session.record().answers.get("ar03"), Some(&2));
    assert_eq!(session.record().answers.len(), 1);
}

#[test]
fn completion_requires_every_answer() {
    let ie = get_instrument("ie").unwrap();
    let definition = ie.definition();
    let mut session = Session::resume(definition, new_record("ie")).unwrap();
    session.start(at("2026-05-04T09:00:00Z")).unwrap();

    for q in definition.questions.iter().skip(1) {
        session.record_answer(&q.id, 4, at("2026-05-04T09:01:00Z")).unwrap();
    }

    let err = session.complete(at("2026-05-04T09:03:00Z")).unwrap_err();
    match err {
        ScoringError::IncompleteSubmission { missing } => {
            assert_eq!(missing[0].question_ids, vec!["ac01".to_string()]);
        }
        other => panic!("expected IncompleteSubmission, got {other:?}"),
    }
    assert_eq!(session.status(), SessionStatus::InProgress);
    assert!(session.score().is_err());
}

#[test]
fn completing_twice_is_a_no_op_and_scoring_twice_is_stable() {
    let flex = get_instrument("flex").unwrap();
    let definition = flex.definition();
    let mut session = Session::resume(definition, new_record("flex")).unwrap();
    session.start(at("2026-05-04T09:00:00Z")).unwrap();
    for q in &definition.questions {
        session.record_answer(&q.id, 4, at("2026-05-04T09:01:00Z")).unwrap();
    }
    session.complete(at("2026-05-04T09:10:00Z")).unwrap();
    session.complete(at("2026-05-04T09:11:00Z")).unwrap();
    assert_eq!(session.record().completed_at, Some(at("2026-05-04T09:10:00Z")));

    let first = session.score().unwrap();
    let second = session.score().unwrap();
    assert_eq!(first, second);

    let err = session.complete(at("2026-05-04T09:12:00Z")).unwrap_err();
    assert!(matches!(
        err,
        ScoringError::InvalidTransition {
            from: SessionStatus::Scored,
            ..
        }
    ));
}

#[test]
fn progress_flags_incomplete_dimensions() {
    let ie = get_instrument("ie").unwrap();
    let definition = ie.definition();
    let mut session = Session::resume(definition, new_record("ie")).unwrap();
    session.start(at("2026-05-04T09:00:00Z")).unwrap();
    for id in ["ac01", "ac02", "ac03", "ac04", "ar01"] {
        session.record_answer(id, 4, at("2026-05-04T09:01:00Z")).unwrap();
    }

    let progress = session.progress();

    assert_eq!(progress.len(), 5);
    assert_eq!(progress[0].dimension, "Autoconsciência");
    assert_eq!(progress[0].status, DimensionStatus::Complete);
    assert_eq!(progress[1].answered, 1);
    assert_eq!(progress[1].expected, 4);
    assert_eq!(progress[1].status, DimensionStatus::Incomplete);
    assert_eq!(progress[4].answered, 0);
}

#[test]
fn resume_rejects_a_session_of_another_test() {
    let ie = get_instrument("ie").unwrap();
    let err = Session::resume(ie.definition(), new_record("disc")).unwrap_err();
    assert!(matches!(err, ScoringError::TestMismatch { .. }));
}

#[test]
fn resume_revalidates_stored_answers() {
    let ie = get_instrument("ie").unwrap();
    let mut record = new_record("ie");
    record.status = SessionStatus::InProgress;
    record.answers.insert("ac01".to_string(), 9);

    let err = Session::resume(ie.definition(), record).unwrap_err();
    assert!(matches!(err, ScoringError::InputValidation { .. }));
}
