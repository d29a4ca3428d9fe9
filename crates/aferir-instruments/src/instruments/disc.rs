use crate::scoring::{
    BandTable, DimensionConvention, LikertScale, OverallBasis, OverallConvention, Question,
    TestDefinition,
};
use crate::Instrument;

/// DISC behavioural profile.
/// Four dimensions (D, I, S, C), 25 self-descriptions each, rated 1–5.
/// Each dimension is presented as a percentage of its 125-point ceiling.
pub struct Disc;

impl Instrument for Disc {
    fn definition(&self) -> &TestDefinition {
        static DEFINITION: std::sync::LazyLock<TestDefinition> = std::sync::LazyLock::new(|| {
            let mut questions = Vec::with_capacity(100);
            questions.extend(traits("D", "d", &[
                "decidida", "ousada", "competitiva", "determinada", "direta",
                "assertiva", "exigente", "independente", "objetiva", "audaciosa",
                "persistente diante de obstáculos", "firme", "ambiciosa", "pioneira", "enérgica",
                "franca", "orientada a resultados", "corajosa", "autoconfiante", "impaciente com a lentidão",
                "focada em metas", "desafiadora", "resoluta", "empreendedora", "dominante",
            ]));
            questions.extend(traits("I", "i", &[
                "comunicativa", "entusiasmada", "persuasiva", "sociável", "otimista",
                "expressiva", "inspiradora", "carismática", "espontânea", "animada",
                "convincente", "extrovertida", "calorosa", "influente", "bem-humorada",
                "criativa", "confiante em público", "agregadora", "popular", "envolvente",
                "motivadora", "articulada", "amigável", "receptiva", "divertida",
            ]));
            questions.extend(traits("S", "s", &[
                "paciente", "calma", "leal", "estável", "cooperativa",
                "tranquila", "constante", "prestativa", "boa ouvinte", "previsível",
                "conciliadora", "gentil", "confiável", "serena", "fiel à rotina",
                "tolerante", "compreensiva", "dedicada", "harmoniosa", "persistente no dia a dia",
                "solidária", "equilibrada", "sincera", "moderada", "acolhedora",
            ]));
            questions.extend(traits("C", "c", &[
                "precisa", "analítica", "cuidadosa", "organizada", "detalhista",
                "disciplinada", "criteriosa", "perfeccionista", "sistemática", "lógica",
                "cautelosa", "rigorosa", "exata", "ponderada", "reservada",
                "diplomática", "investigativa", "planejadora", "conscienciosa", "correta",
                "meticulosa", "prudente", "apegada aos fatos", "estruturada", "exigente com a qualidade",
            ]));

            TestDefinition {
                id: "disc".to_string(),
                name: "DISC".to_string(),
                description: "Perfil comportamental: Dominância, Influência, Estabilidade e Conformidade".to_string(),
                scale: LikertScale::ONE_TO_FIVE,
                questions,
                sub_tests: Vec::new(),
                dimension_convention: DimensionConvention::Percentage,
                overall_convention: OverallConvention::MeanOfDimensions,
                overall_basis: OverallBasis::OverallScore,
                dimension_bands: BandTable::new(&[
                    (75.0, "Muito alto"),
                    (50.0, "Alto"),
                    (25.0, "Moderado"),
                    (0.0, "Baixo"),
                ]),
                overall_bands: BandTable::new(&[
                    (75.0, "Perfil muito marcado"),
                    (50.0, "Perfil marcado"),
                    (0.0, "Perfil equilibrado"),
                ]),
            }
        });
        &DEFINITION
    }
}

fn traits(dimension: &str, prefix: &str, adjectives: &[&str]) -> Vec<Question> {
    adjectives
        .iter()
        .enumerate()
        .map(|(i, adjective)| {
            Question::new(
                format!("{prefix}{:02}", i + 1),
                dimension,
                format!("No trabalho, sou uma pessoa {adjective}."),
            )
        })
        .collect()
}
