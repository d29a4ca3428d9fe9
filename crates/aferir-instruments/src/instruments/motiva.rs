use crate::scoring::{
    BandTable, DimensionConvention, LikertScale, OverallBasis, OverallConvention, Question,
    TestDefinition,
};
use crate::Instrument;

use super::items;

/// MOTIVA: motivational drivers at work.
/// Six drivers, five items each, rated 1–5, presented as percentages.
pub struct Motiva;

impl Instrument for Motiva {
    fn definition(&self) -> &TestDefinition {
        static DEFINITION: std::sync::LazyLock<TestDefinition> = std::sync::LazyLock::new(|| {
            let mut questions: Vec<Question> = Vec::with_capacity(30);
            questions.extend(items("Autonomia", "au", &[
                "Gosto de decidir como executar minhas tarefas.",
                "Rendo mais quando tenho liberdade para organizar meu tempo.",
                "Prefiro metas claras a instruções detalhadas.",
                "Sinto-me valorizado quando confiam no meu julgamento.",
                "Busco espaço para propor meus próprios projetos.",
            ]));
            questions.extend(items("Reconhecimento", "rc", &[
                "Elogios públicos aumentam meu empenho.",
                "É importante que meus resultados sejam percebidos pela liderança.",
                "Premiações e destaques me motivam.",
                "Sinto falta de retorno quando entrego um bom trabalho.",
                "Valorizo ser lembrado pelas minhas contribuições.",
            ]));
            questions.extend(items("Propósito", "pr", &[
                "Preciso entender o impacto do meu trabalho.",
                "Sinto-me motivado quando meu trabalho ajuda outras pessoas.",
                "A missão da empresa influencia meu engajamento.",
                "Busco atividades alinhadas aos meus valores.",
                "Trabalho melhor quando vejo sentido no que faço.",
            ]));
            questions.extend(items("Crescimento", "cr", &[
                "Desafios novos me estimulam.",
                "Planejo ativamente os próximos passos da minha carreira.",
                "Oportunidades de promoção influenciam minha dedicação.",
                "Gosto de assumir responsabilidades maiores.",
                "Aprender coisas novas me mantém motivado.",
            ]));
            questions.extend(items("Relacionamentos", "rl", &[
                "Um bom ambiente com os colegas é essencial para mim.",
                "Gosto de trabalhar em equipe.",
                "Sinto-me motivado quando tenho apoio dos colegas.",
                "Valorizo momentos de integração no trabalho.",
                "Relações de confiança me fazem render mais.",
            ]));
            questions.extend(items("Segurança", "sg", &[
                "Estabilidade no emprego é prioridade para mim.",
                "Prefiro regras e processos bem definidos.",
                "Benefícios consistentes influenciam minha permanência.",
                "Sinto-me desconfortável com incertezas sobre o futuro.",
                "Valorizo previsibilidade na remuneração.",
            ]));

            TestDefinition {
                id: "motiva".to_string(),
                name: "MOTIVA".to_string(),
                description: "Fatores motivacionais no trabalho".to_string(),
                scale: LikertScale::ONE_TO_FIVE,
                questions,
                sub_tests: Vec::new(),
                dimension_convention: DimensionConvention::Percentage,
                overall_convention: OverallConvention::MeanOfDimensions,
                overall_basis: OverallBasis::OverallScore,
                dimension_bands: BandTable::new(&[
                    (80.0, "Motivador principal"),
                    (60.0, "Motivador relevante"),
                    (40.0, "Motivador moderado"),
                    (0.0, "Pouco motivador"),
                ]),
                overall_bands: BandTable::new(&[
                    (80.0, "Motivação muito alta"),
                    (60.0, "Motivação alta"),
                    (40.0, "Motivação moderada"),
                    (0.0, "Motivação baixa"),
                ]),
            }
        });
        &DEFINITION
    }
}
