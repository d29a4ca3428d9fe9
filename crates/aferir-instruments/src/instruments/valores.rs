use crate::scoring::{
    BandTable, DimensionConvention, LikertScale, OverallBasis, OverallConvention, Question,
    TestDefinition,
};
use crate::Instrument;

use super::items;

/// VALORES: personal work values.
/// Six values, four items each, rated 1–5, presented as percentages.
pub struct Valores;

impl Instrument for Valores {
    fn definition(&self) -> &TestDefinition {
        static DEFINITION: std::sync::LazyLock<TestDefinition> = std::sync::LazyLock::new(|| {
            let mut questions: Vec<Question> = Vec::with_capacity(24);
            questions.extend(items("Ética", "et", &[
                "Agir com honestidade é inegociável para mim.",
                "Recuso vantagens obtidas de forma injusta.",
                "Assumo meus erros mesmo quando ninguém perceberia.",
                "Espero transparência nas decisões da empresa.",
            ]));
            questions.extend(items("Inovação", "in", &[
                "Gosto de questionar a forma como as coisas são feitas.",
                "Valorizo ambientes que estimulam ideias novas.",
                "Aceito riscos para experimentar soluções diferentes.",
                "Sinto-me realizado ao criar algo inédito.",
            ]));
            questions.extend(items("Colaboração", "co", &[
                "Prefiro conquistas coletivas a individuais.",
                "Compartilho informações que ajudam os colegas.",
                "Valorizo decisões construídas em grupo.",
                "Ofereço ajuda sem esperar retorno.",
            ]));
            questions.extend(items("Excelência", "ex", &[
                "Busco entregar acima do esperado.",
                "Reviso meu trabalho até ficar satisfeito.",
                "Estabeleço padrões altos para mim mesmo.",
                "Admiro profissionais que dominam seu ofício.",
            ]));
            questions.extend(items("Responsabilidade Social", "rs", &[
                "Considero o impacto social das decisões de negócio.",
                "Valorizo empresas comprometidas com a sustentabilidade.",
                "Participo de ações voluntárias quando posso.",
                "Diversidade e inclusão são importantes para mim.",
            ]));
            questions.extend(items("Equilíbrio", "eq", &[
                "Preservar tempo para a vida pessoal é essencial.",
                "Valorizo flexibilidade de horário.",
                "Cuido da minha saúde mesmo em períodos intensos.",
                "Evito levar trabalho para os momentos de descanso.",
            ]));

            TestDefinition {
                id: "valores".to_string(),
                name: "VALORES".to_string(),
                description: "Valores pessoais no trabalho".to_string(),
                scale: LikertScale::ONE_TO_FIVE,
                questions,
                sub_tests: Vec::new(),
                dimension_convention: DimensionConvention::Percentage,
                overall_convention: OverallConvention::MeanOfDimensions,
                overall_basis: OverallBasis::OverallScore,
                dimension_bands: BandTable::new(&[
                    (85.0, "Valor central"),
                    (65.0, "Valor importante"),
                    (45.0, "Valor moderado"),
                    (0.0, "Valor periférico"),
                ]),
                overall_bands: BandTable::new(&[
                    (80.0, "Alto alinhamento de valores"),
                    (60.0, "Alinhamento moderado"),
                    (0.0, "Baixo alinhamento"),
                ]),
            }
        });
        &DEFINITION
    }
}
