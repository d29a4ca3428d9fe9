use crate::scoring::{
    BandTable, DimensionConvention, LikertScale, OverallBasis, OverallConvention, Question,
    TestDefinition,
};
use crate::Instrument;

use super::{items, reverse};

/// Organizational climate survey.
/// Twelve dimensions, three items each, rated 1–5. Each dimension's mean is
/// rescaled to a 0–100 index; the global index is the mean of the twelve.
pub struct Clima;

impl Instrument for Clima {
    fn definition(&self) -> &TestDefinition {
        static DEFINITION: std::sync::LazyLock<TestDefinition> = std::sync::LazyLock::new(|| {
            let blocks: [(&str, &str, [&str; 3]); 12] = [
                ("Liderança", "li", [
                    "Minha liderança comunica expectativas com clareza.",
                    "Recebo apoio da liderança quando preciso.",
                    "Minha liderança trata a equipe com justiça.",
                ]),
                ("Comunicação", "cm", [
                    "As informações importantes chegam a tempo.",
                    "Sinto-me à vontade para dar opiniões.",
                    "Há diálogo aberto entre as áreas.",
                ]),
                ("Reconhecimento", "rc", [
                    "Meu trabalho é reconhecido.",
                    "Recebo feedback sobre meu desempenho.",
                    "As conquistas da equipe são celebradas.",
                ]),
                ("Segurança Psicológica", "sp", [
                    "Posso admitir erros sem medo de punição.",
                    "Posso discordar da maioria sem ser prejudicado.",
                    "Sinto-me seguro para propor ideias arriscadas.",
                ]),
                ("Autonomia", "au", [
                    "Tenho liberdade para decidir como fazer meu trabalho.",
                    "Confiam no meu julgamento profissional.",
                    "Posso organizar minha rotina.",
                ]),
                ("Colaboração", "co", [
                    "Os colegas se ajudam espontaneamente.",
                    "As equipes trabalham bem em conjunto.",
                    "Os conflitos são resolvidos de forma construtiva.",
                ]),
                ("Desenvolvimento", "de", [
                    "Tenho oportunidades de aprender e crescer.",
                    "A empresa investe em capacitação.",
                    "Sinto que estou estagnado profissionalmente nesta empresa.",
                ]),
                ("Equilíbrio Vida-Trabalho", "ev", [
                    "Consigo equilibrar trabalho e vida pessoal.",
                    "A carga de trabalho é adequada.",
                    "Meu horário de descanso é respeitado.",
                ]),
                ("Propósito", "pr", [
                    "Entendo como meu trabalho contribui para a empresa.",
                    "Orgulho-me de trabalhar aqui.",
                    "Os valores da empresa são praticados no dia a dia.",
                ]),
                ("Condições de Trabalho", "ct", [
                    "Tenho os recursos necessários para trabalhar bem.",
                    "O ambiente físico é adequado.",
                    "As ferramentas e sistemas funcionam bem.",
                ]),
                ("Remuneração e Benefícios", "rb", [
                    "Minha remuneração é compatível com minhas responsabilidades.",
                    "Os benefícios atendem às minhas necessidades.",
                    "Os critérios de remuneração são transparentes.",
                ]),
                ("Inovação", "in", [
                    "Novas ideias são bem recebidas.",
                    "A empresa busca melhorar seus processos.",
                    "Há espaço para experimentar novas soluções.",
                ]),
            ];

            let questions: Vec<Question> = blocks
                .iter()
                .flat_map(|(dimension, prefix, texts)| items(dimension, prefix, texts))
                .collect();

            let bands = BandTable::new(&[
                (85.0, "Excelente"),
                (70.0, "Sólido"),
                (55.0, "Atenção"),
                (0.0, "Crítico"),
            ]);

            TestDefinition {
                id: "clima".to_string(),
                name: "Clima Organizacional".to_string(),
                description: "Pesquisa de clima organizacional em doze dimensões".to_string(),
                scale: LikertScale::ONE_TO_FIVE,
                questions: reverse(questions, &["de03"]),
                sub_tests: Vec::new(),
                dimension_convention: DimensionConvention::Mean { rescale: true },
                overall_convention: OverallConvention::MeanOfDimensions,
                overall_basis: OverallBasis::OverallScore,
                dimension_bands: bands.clone(),
                overall_bands: bands,
            }
        });
        &DEFINITION
    }
}
