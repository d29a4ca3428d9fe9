//! Object key conventions.
//!
//! Pure string functions with no AWS SDK dependency. Every tenant (company)
//! owns a prefix; sessions, results and narratives live underneath it.

use uuid::Uuid;

use crate::error::CoreError;

pub fn sessions_prefix(company_id: &str) -> String {
    format!("companies/{company_id}/sessions/")
}

pub fn session(company_id: &str, id: Uuid) -> String {
    format!("companies/{company_id}/sessions/{id}/session.json")
}

pub fn session_result(company_id: &str, id: Uuid) -> String {
    format!("companies/{company_id}/sessions/{id}/result.json")
}

pub fn session_narrative(company_id: &str, id: Uuid) -> String {
    format!("companies/{company_id}/sessions/{id}/narrative.json")
}

pub fn narrative_transaction(company_id: &str, id: Uuid) -> String {
    format!("companies/{company_id}/transactions/{id}.json")
}

pub const SYSTEM_PROMPT: &str = "system-prompt.md";

/// Extract the session id from a `session.json` key.
///
/// Returns `Ok(None)` for keys under the sessions prefix that are not a
/// session document (results, narratives).
pub fn parse_session_key(company_id: &str, key: &str) -> Result<Option<Uuid>, CoreError> {
    let prefix = sessions_prefix(company_id);
    let rest = key
        .strip_prefix(&prefix)
        .ok_or_else(|| CoreError::InvalidKey {
            key: key.to_string(),
            expected: "company session",
        })?;

    match rest.split_once('/') {
        Some((id, "session.json")) => Ok(Some(id.parse::<Uuid>()?)),
        Some(_) => Ok(None),
        None => Err(CoreError::InvalidKey {
            key: key.to_string(),
            expected: "session document",
        }),
    }
}
