use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::token_count::TokenUsage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TransactionStatus {
    Complete,
    Failed,
}

/// Audit record of one narrative-generation call, successful or not.
/// Stored per company so model spend can be reviewed.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NarrativeTransaction {
    pub id: Uuid,
    pub session_id: Uuid,
    pub model_id: String,
    pub usage: TokenUsage,
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: jiff::Timestamp,
}

impl NarrativeTransaction {
    /// A call that produced no narrative. No usage is billed for it.
    pub fn failed(
        session_id: Uuid,
        model_id: impl Into<String>,
        error: impl Into<String>,
        now: jiff::Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            model_id: model_id.into(),
            usage: TokenUsage::default(),
            status: TransactionStatus::Failed,
            error: Some(error.into()),
            created_at: now,
        }
    }
}
