//! Prompt assembly for narrative generation.
//!
//! The model only ever sees the computed result rendered as text. Raw
//! answers and respondent identity are not included.

/// Used when the bucket has no `system-prompt.md`.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
Você é um psicólogo organizacional que redige devolutivas de testes \
psicométricos aplicados a colaboradores. Receberá o resultado já calculado \
de um teste dentro de um bloco <test_result>. Não recalcule nem altere \
pontuações ou classificações; descreva-as.

Responda somente com um objeto JSON com os campos:
- \"summary\": string, um parágrafo de síntese;
- \"strengths\": lista de strings;
- \"development_areas\": lista de strings;
- \"recommendations\": lista de strings;
- \"custom_sections\": objeto opcional de título para texto.

Escreva em português do Brasil, em tom profissional e respeitoso.";

/// Wrap a structured result summary in a `<test_result>` block.
///
/// Returns an empty string when there is nothing to describe.
pub fn build_result_block(test_name: &str, structured_input: &str) -> String {
    let body = structured_input.trim();
    if body.is_empty() {
        return String::new();
    }

    let mut block = format!("<test_result name=\"{}\">\n", test_name.replace('"', "'"));
    block.push_str(body);
    block.push_str("\n</test_result>");
    block
}

/// The user turn sent to the model for one result block.
pub fn build_user_message(result_block: &str) -> String {
    format!("{result_block}\n\nGere a devolutiva deste resultado no formato JSON indicado.")
}
