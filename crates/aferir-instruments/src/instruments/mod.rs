pub mod bolie;
pub mod clima;
pub mod disc;
pub mod flex;
pub mod ie;
pub mod motiva;
pub mod valores;

use crate::scoring::Question;

/// Number a block of statements as `{prefix}01`, `{prefix}02`, … under one dimension.
fn items(dimension: &str, prefix: &str, texts: &[&str]) -> Vec<Question> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| Question::new(format!("{prefix}{:02}", i + 1), dimension, *text))
        .collect()
}

/// Flag the listed questions as reversed items.
fn reverse(mut questions: Vec<Question>, ids: &[&str]) -> Vec<Question> {
    for q in questions.iter_mut().filter(|q| ids.contains(&q.id.as_str())) {
        q.reversed = true;
    }
    questions
}
