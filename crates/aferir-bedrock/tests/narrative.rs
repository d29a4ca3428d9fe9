use aferir_bedrock::error::NarrativeError;
use aferir_bedrock::narrative::{parse_narrative, TransactionResult};
use aferir_bedrock::tokens::{get_pricing, priced_usage};
use aferir_core::models::narrative::Narrative;
use aferir_core::models::token_count::TokenCount;
use aferir_core::models::transaction::TransactionStatus;
use uuid::Uuid;

#[test]
fn parses_plain_json() {
    let narrative = parse_narrative(
        r#"{"summary":"Perfil estável.","strengths":["Constância"],"development_areas":[],"recommendations":["Delegar"]}"#,
    )
    .unwrap();

    assert_eq!(narrative.summary, "Perfil estável.");
    assert_eq!(narrative.strengths, vec!["Constância"]);
    assert_eq!(narrative.recommendations, vec!["Delegar"]);
    assert!(narrative.custom_sections.is_empty());
}

#[test]
fn parses_fenced_json() {
    let text = "Segue a devolutiva:\n```json\n{\"summary\": \"Ok.\"}\n```";
    let narrative = parse_narrative(text).unwrap();
    assert_eq!(narrative.summary, "Ok.");
    assert!(narrative.strengths.is_empty());
}

#[test]
fn text_without_object_is_parse_error() {
    let err = parse_narrative("Não foi possível gerar.").unwrap_err();
    assert!(matches!(err, NarrativeError::NotJson(_)));
}

#[test]
fn missing_summary_is_schema_violation() {
    let err = parse_narrative(r#"{"strengths": ["a"]}"#).unwrap_err();
    assert!(matches!(err, NarrativeError::SchemaViolation(_)));

    let err = parse_narrative(r#"{"summary": "  "}"#).unwrap_err();
    assert!(matches!(err, NarrativeError::SchemaViolation(_)));
}

#[test]
fn known_models_are_priced() {
    let usage = priced_usage(
        "us.anthropic.claude-sonnet-4-20250514-v1:0",
        TokenCount {
            input: 1_000_000,
            output: 100_000,
        },
    );
    assert!((usage.cost_usd - 4.5).abs() < 1e-9);
}

#[test]
fn unknown_models_cost_nothing() {
    assert!(get_pricing("some.other-model").is_none());
    let usage = priced_usage("some.other-model", TokenCount { input: 10, output: 10 });
    assert_eq!(usage.cost_usd, 0.0);
    assert_eq!(usage.tokens.total(), 20);
}

#[test]
fn transaction_result_splits_into_records() {
    let session_id = Uuid::new_v4();
    let now: jiff::Timestamp = "2025-03-01T12:00:00Z".parse().unwrap();
    let result = TransactionResult {
        id: Uuid::new_v4(),
        model_id: "m".to_string(),
        usage: Default::default(),
        status: TransactionStatus::Complete,
        output: Narrative {
            summary: "s".to_string(),
            strengths: vec![],
            development_areas: vec![],
            recommendations: vec![],
            custom_sections: Default::default(),
        },
    };
    let id = result.id;

    let (narrative, transaction) = result.into_records(session_id, now);
    assert_eq!(narrative.transaction_id, id);
    assert_eq!(transaction.id, id);
    assert_eq!(transaction.session_id, session_id);
    assert_eq!(narrative.created_at, now);
}
