use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Descriptive report returned by the narrative model for a scored session.
///
/// Stored alongside the result. It is never read back into scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Narrative {
    pub summary: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub development_areas: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,

    // Extensible
    #[serde(default)]
    pub custom_sections: HashMap<String, String>,
}

/// A narrative together with the transaction that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionNarrative {
    pub session_id: Uuid,
    pub transaction_id: Uuid,
    pub narrative: Narrative,
    pub created_at: jiff::Timestamp,
}
