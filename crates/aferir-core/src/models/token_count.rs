use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Input and output tokens of a model call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TokenCount {
    pub input: u64,
    pub output: u64,
}

impl TokenCount {
    pub fn total(&self) -> u64 {
        self.input + self.output
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TokenUsage {
    pub tokens: TokenCount,
    /// Zero when the model has no known price.
    pub cost_usd: f64,
}

impl TokenUsage {
    pub fn unpriced(tokens: TokenCount) -> Self {
        Self { tokens, cost_usd: 0.0 }
    }
}
