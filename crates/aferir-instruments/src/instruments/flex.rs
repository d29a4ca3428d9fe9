use crate::scoring::{
    BandTable, DimensionConvention, LikertScale, OverallBasis, OverallConvention, Question,
    TestDefinition,
};
use crate::Instrument;

use super::{items, reverse};

/// FLEX adaptability inventory.
/// 24 items in four dimensions of six, rated 1–5.
/// Dimensions report their raw sum (6–30). The overall score is the mean of
/// all 24 answers (0–5), classified by the raw total (24–120).
pub struct Flex;

impl Instrument for Flex {
    fn definition(&self) -> &TestDefinition {
        static DEFINITION: std::sync::LazyLock<TestDefinition> = std::sync::LazyLock::new(|| {
            let mut questions: Vec<Question> = Vec::with_capacity(24);
            questions.extend(items("Flexibilidade Cognitiva", "fc", &[
                "Consigo enxergar um problema por diferentes ângulos.",
                "Mudo de estratégia com facilidade quando a atual não funciona.",
                "Considero ideias contrárias às minhas antes de decidir.",
                "Adapto meu raciocínio quando recebo informações novas.",
                "Encontro soluções alternativas quando um caminho é bloqueado.",
                "Consigo alternar entre tarefas diferentes sem perder o foco.",
            ]));
            questions.extend(items("Resiliência Emocional", "re", &[
                "Recupero-me rapidamente de frustrações no trabalho.",
                "Mantenho a calma em situações de incerteza.",
                "Encaro erros como oportunidades de aprendizado.",
                "Consigo controlar a ansiedade diante de prazos apertados.",
                "Mantenho a motivação mesmo após receber críticas.",
                "Lido bem com a pressão de mudanças repentinas.",
            ]));
            questions.extend(reverse(items("Abertura à Mudança", "am", &[
                "Recebo bem novas formas de trabalhar.",
                "Sinto-me motivado por mudanças na organização.",
                "Experimento novas ferramentas sem receio.",
                "Aceito mudanças de prioridade com naturalidade.",
                "Vejo reestruturações como oportunidades.",
                "Prefiro que as coisas continuem sempre como estão.",
            ]), &["am06"]));
            questions.extend(items("Aprendizagem Contínua", "ac", &[
                "Busco aprender algo novo com frequência.",
                "Peço feedback para melhorar meu desempenho.",
                "Aprendo rapidamente tarefas que nunca executei.",
                "Invisto tempo no meu desenvolvimento profissional.",
                "Aplico no trabalho o que aprendo em cursos e leituras.",
                "Compartilho com a equipe o que aprendo.",
            ]));

            TestDefinition {
                id: "flex".to_string(),
                name: "FLEX".to_string(),
                description: "Adaptabilidade: flexibilidade cognitiva, resiliência, abertura e aprendizagem".to_string(),
                scale: LikertScale::ONE_TO_FIVE,
                questions,
                sub_tests: Vec::new(),
                dimension_convention: DimensionConvention::RawSum,
                overall_convention: OverallConvention::MeanOfAnswers,
                overall_basis: OverallBasis::RawTotal,
                dimension_bands: BandTable::new(&[
                    (26.0, "Muito alta"),
                    (21.0, "Alta"),
                    (15.0, "Moderada"),
                    (0.0, "Baixa"),
                ]),
                overall_bands: BandTable::new(&[
                    (110.0, "Adaptabilidade excepcional"),
                    (90.0, "Alta adaptabilidade"),
                    (60.0, "Adaptabilidade moderada"),
                    (0.0, "Baixa adaptabilidade"),
                ]),
            }
        });
        &DEFINITION
    }
}
