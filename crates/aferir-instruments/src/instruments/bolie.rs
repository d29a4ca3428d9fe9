use crate::scoring::{
    BandTable, DimensionConvention, LikertScale, OverallBasis, OverallConvention, Question,
    SubTest, TestDefinition,
};
use crate::Instrument;

use super::{items, reverse};

/// BOLIE: composite of four sub-instruments (TOHE, VE, QORE, QOE).
/// Each dimension is the mean of its items (1–5); each sub-test is the mean
/// of its dimensions and the overall score is the mean of the sub-tests.
pub struct Bolie;

impl Instrument for Bolie {
    fn definition(&self) -> &TestDefinition {
        static DEFINITION: std::sync::LazyLock<TestDefinition> = std::sync::LazyLock::new(|| {
            let mut questions: Vec<Question> = Vec::with_capacity(24);

            questions.extend(within("TOHE", items("Reconhecimento Emocional", "tre", &[
                "Percebo com facilidade o que estou sentindo.",
                "Identifico emoções nos colegas pelo tom de voz.",
                "Sei nomear as emoções que surgem em conflitos.",
            ])));
            questions.extend(within("TOHE", reverse(items("Gestão Emocional", "tge", &[
                "Consigo me acalmar antes de responder a uma provocação.",
                "Expresso discordância sem agressividade.",
                "Costumo perder o controle quando estou sob pressão.",
            ]), &["tge03"])));

            questions.extend(within("VE", items("Integridade", "vin", &[
                "Cumpro o que prometo.",
                "Mantenho minha posição ética mesmo sob pressão.",
                "Sou coerente entre o que digo e o que faço.",
            ])));
            questions.extend(within("VE", items("Compromisso", "vco", &[
                "Dedico-me às metas da equipe como se fossem minhas.",
                "Cumpro prazos mesmo em situações adversas.",
                "Assumo a responsabilidade pelos resultados do meu trabalho.",
            ])));

            questions.extend(within("QORE", items("Confiança", "qcf", &[
                "Confio nas pessoas com quem trabalho.",
                "Compartilho dificuldades com a liderança sem receio.",
                "Sinto que os colegas confiam em mim.",
            ])));
            questions.extend(within("QORE", items("Cooperação", "qcp", &[
                "Ajudo colegas mesmo fora das minhas atribuições.",
                "Resolvo conflitos buscando acordos.",
                "Celebro as conquistas dos colegas.",
            ])));

            questions.extend(within("QOE", items("Energia", "qen", &[
                "Começo o dia de trabalho com disposição.",
                "Mantenho o ritmo até o fim do expediente.",
                "Sinto entusiasmo com as tarefas que realizo.",
            ])));
            questions.extend(within("QOE", items("Dedicação", "qde", &[
                "Orgulho-me do trabalho que faço.",
                "Envolvo-me profundamente nas minhas atividades.",
                "Sinto que meu trabalho é desafiador na medida certa.",
            ])));

            let bands = BandTable::new(&[
                (4.2, "Muito desenvolvido"),
                (3.4, "Desenvolvido"),
                (2.6, "Em desenvolvimento"),
                (0.0, "Pouco desenvolvido"),
            ]);

            TestDefinition {
                id: "bolie".to_string(),
                name: "BOLIE".to_string(),
                description: "Bateria composta: TOHE, VE, QORE e QOE".to_string(),
                scale: LikertScale::ONE_TO_FIVE,
                questions,
                sub_tests: vec![
                    sub_test("TOHE", "Orientação a Habilidades Emocionais"),
                    sub_test("VE", "Valores Essenciais"),
                    sub_test("QORE", "Qualidade dos Relacionamentos"),
                    sub_test("QOE", "Qualidade do Engajamento"),
                ],
                dimension_convention: DimensionConvention::Mean { rescale: false },
                overall_convention: OverallConvention::MeanOfSubTests,
                overall_basis: OverallBasis::OverallScore,
                dimension_bands: bands.clone(),
                overall_bands: bands,
            }
        });
        &DEFINITION
    }
}

fn within(sub_test: &str, questions: Vec<Question>) -> Vec<Question> {
    questions.into_iter().map(|q| q.in_sub_test(sub_test)).collect()
}

fn sub_test(id: &str, name: &str) -> SubTest {
    SubTest {
        id: id.to_string(),
        name: name.to_string(),
    }
}
