use crate::scoring::{
    BandTable, DimensionConvention, LikertScale, OverallBasis, OverallConvention, Question,
    TestDefinition,
};
use crate::Instrument;

use super::{items, reverse};

/// Emotional intelligence inventory.
/// Five dimensions, four items each, rated 1–5. The overall score is the
/// mean of all twenty answers.
pub struct InteligenciaEmocional;

impl Instrument for InteligenciaEmocional {
    fn definition(&self) -> &TestDefinition {
        static DEFINITION: std::sync::LazyLock<TestDefinition> = std::sync::LazyLock::new(|| {
            let mut questions: Vec<Question> = Vec::with_capacity(20);
            questions.extend(items("Autoconsciência", "ac", &[
                "Reconheço minhas emoções no momento em que surgem.",
                "Sei como meu humor afeta meu desempenho.",
                "Conheço meus pontos fortes e limitações.",
                "Percebo quando estou ficando estressado.",
            ]));
            questions.extend(reverse(items("Autorregulação", "ar", &[
                "Penso antes de agir em momentos de tensão.",
                "Mantenho a compostura diante de críticas.",
                "Reajo de forma impulsiva quando sou contrariado.",
                "Adapto minhas reações ao contexto.",
            ]), &["ar03"]));
            questions.extend(items("Automotivação", "am", &[
                "Persisto nos objetivos mesmo diante de obstáculos.",
                "Encontro motivação própria para começar tarefas difíceis.",
                "Mantenho o otimismo após fracassos.",
                "Estabeleço metas desafiadoras para mim.",
            ]));
            questions.extend(items("Empatia", "em", &[
                "Percebo como os outros estão se sentindo.",
                "Considero o ponto de vista alheio antes de julgar.",
                "Escuto com atenção quando alguém desabafa.",
                "Respeito sentimentos diferentes dos meus.",
            ]));
            questions.extend(items("Habilidades Sociais", "hs", &[
                "Construo relacionamentos com facilidade.",
                "Consigo mediar conflitos entre pessoas.",
                "Comunico ideias difíceis com tato.",
                "Influencio positivamente o grupo.",
            ]));

            let bands = BandTable::new(&[
                (4.5, "Inteligência emocional excepcional"),
                (3.5, "Inteligência emocional elevada"),
                (2.75, "Inteligência emocional adequada"),
                (2.0, "Dificuldade moderada"),
                (0.0, "Dificuldade severa"),
            ]);

            TestDefinition {
                id: "ie".to_string(),
                name: "Inteligência Emocional".to_string(),
                description: "Autoconsciência, autorregulação, automotivação, empatia e habilidades sociais".to_string(),
                scale: LikertScale::ONE_TO_FIVE,
                questions,
                sub_tests: Vec::new(),
                dimension_convention: DimensionConvention::Mean { rescale: false },
                overall_convention: OverallConvention::MeanOfAnswers,
                overall_basis: OverallBasis::OverallScore,
                dimension_bands: bands.clone(),
                overall_bands: bands,
            }
        });
        &DEFINITION
    }
}
