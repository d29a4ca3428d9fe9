use std::collections::HashSet;

use aferir_core::models::answer::Answer;
use aferir_instruments::error::ScoringError;
use aferir_instruments::scoring::{
    BandTable, DimensionConvention, LikertScale, OverallBasis, OverallConvention, Question,
    TestDefinition,
};
use aferir_instruments::source::{QuestionSource, StaticQuestionSource};
use aferir_instruments::{all_instruments, get_instrument, load_instrument};

fn definition(questions: Vec<Question>) -> TestDefinition {
    TestDefinition {
        id: "t".to_string(),
        name: "T".to_string(),
        description: String::new(),
        scale: LikertScale::ONE_TO_FIVE,
        questions,
        sub_tests: Vec::new(),
        dimension_convention: DimensionConvention::Percentage,
        overall_convention: OverallConvention::MeanOfDimensions,
        overall_basis: OverallBasis::OverallScore,
        dimension_bands: BandTable::new(&[(50.0, "Alto"), (0.0, "Baixo")]),
        overall_bands: BandTable::new(&[(50.0, "Alto"), (0.0, "Baixo")]),
    }
}

fn reason(err: ScoringError) -> String {
    match err {
        ScoringError::InvalidDefinition { reason, .. } => reason,
        other => panic!("expected InvalidDefinition, got {other:?}"),
    }
}

#[test]
fn every_builtin_definition_is_valid() {
    for instrument in all_instruments() {
        instrument
            .definition()
            .validate()
            .unwrap_or_else(|e| panic!("{}: {e}", instrument.id()));
    }
}

#[test]
fn instrument_ids_are_unique() {
    let ids: Vec<String> = all_instruments().iter().map(|i| i.id().to_string()).collect();
    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(ids.len(), unique.len());
    assert_eq!(ids.len(), 7);
}

#[test]
fn dimension_question_counts_are_fixed() {
    let expectations = [
        ("disc", 4, 25),
        ("flex", 4, 6),
        ("motiva", 6, 5),
        ("valores", 6, 4),
        ("bolie", 8, 3),
        ("clima", 12, 3),
        ("ie", 5, 4),
    ];
    for (id, dimensions, per_dimension) in expectations {
        let instrument = get_instrument(id).unwrap();
        let counts = instrument.definition().dimension_question_counts();
        assert_eq!(counts.len(), dimensions, "{id}");
        assert!(counts.iter().all(|(_, n)| *n == per_dimension), "{id}: {counts:?}");
    }
}

#[test]
fn climate_reverses_only_the_stagnation_item() {
    let clima = get_instrument("clima").unwrap();
    let reversed: Vec<&Question> = clima
        .definition()
        .questions
        .iter()
        .filter(|q| q.reversed)
        .collect();
    assert_eq!(reversed.len(), 1);
    assert_eq!(reversed[0].id, "de03");
    assert!(reversed[0].text.contains("estagnado"));
}

#[test]
fn static_source_serves_ordered_questions() {
    let questions = StaticQuestionSource.questions("flex").unwrap();
    assert_eq!(questions.len(), 24);
    assert_eq!(questions[0].id, "fc01");
    assert_eq!(questions[23].id, "ac06");
}

#[test]
fn static_source_reports_unknown_tests() {
    let err = StaticQuestionSource.questions("tarot").unwrap_err();
    assert!(matches!(err, ScoringError::UnknownTest(id) if id == "tarot"));
}

#[test]
fn load_instrument_validates() {
    assert_eq!(load_instrument("bolie").unwrap().name(), "BOLIE");
    assert!(matches!(
        load_instrument("nope"),
        Err(ScoringError::UnknownTest(_))
    ));
}

#[test]
fn empty_question_bank_is_invalid() {
    let err = definition(Vec::new()).validate().unwrap_err();
    assert!(reason(err).contains("no questions"));
}

#[test]
fn duplicate_question_ids_are_invalid() {
    let err = definition(vec![
        Question::new("q1", "A", "x"),
        Question::new("q1", "A", "y"),
    ])
    .validate()
    .unwrap_err();
    assert!(reason(err).contains("duplicate"));
}

#[test]
fn blank_dimension_is_invalid() {
    let err = definition(vec![Question::new("q1", " ", "x")])
        .validate()
        .unwrap_err();
    assert!(reason(err).contains("no dimension"));
}

#[test]
fn bands_must_descend() {
    let mut def = definition(vec![Question::new("q1", "A", "x")]);
    def.overall_bands = BandTable::new(&[(10.0, "Baixo"), (50.0, "Alto")]);
    let err = def.validate().unwrap_err();
    assert!(reason(err).contains("descending"));
}

#[test]
fn sub_test_roll_up_requires_sub_tests() {
    let mut def = definition(vec![Question::new("q1", "A", "x")]);
    def.overall_convention = OverallConvention::MeanOfSubTests;
    let err = def.validate().unwrap_err();
    assert!(reason(err).contains("sub-tests"));
}

#[test]
fn dimension_cannot_span_sub_tests() {
    let mut def = definition(vec![
        Question::new("q1", "A", "x").in_sub_test("S1"),
        Question::new("q2", "A", "y").in_sub_test("S2"),
    ]);
    def.sub_tests = vec![
        aferir_instruments::scoring::SubTest {
            id: "S1".to_string(),
            name: "One".to_string(),
        },
        aferir_instruments::scoring::SubTest {
            id: "S2".to_string(),
            name: "Two".to_string(),
        },
    ];
    let err = def.validate().unwrap_err();
    assert!(reason(err).contains("more than one sub-test"));
}

#[test]
fn batch_validation_reports_every_problem() {
    let ie = get_instrument("ie").unwrap();
    let errors = ie.validate_answers(&[
        Answer::new("ac01", 3),
        Answer::new("ac02", 0),
        Answer::new("zz01", 3),
        Answer::new("ac03", 7),
    ]);

    let ids: Vec<&str> = errors.iter().map(|e| e.question_id.as_str()).collect();
    assert_eq!(ids, vec!["ac02", "zz01", "ac03"]);
    assert!(errors[0].message.contains("outside range [1, 5]"));
    assert!(errors[1].message.contains("unknown question"));
}
