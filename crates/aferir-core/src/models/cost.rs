use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::token_count::{TokenCount, TokenUsage};

/// List price of a model in USD per million tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModelPricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

impl ModelPricing {
    pub fn estimate_cost(&self, tokens: TokenCount) -> f64 {
        per_million(tokens.input, self.input_per_million) + per_million(tokens.output, self.output_per_million)
    }

    pub fn usage(&self, tokens: TokenCount) -> TokenUsage {
        TokenUsage {
            tokens,
            cost_usd: self.estimate_cost(tokens),
        }
    }
}

fn per_million(count: u64, price: f64) -> f64 {
    count as f64 / 1_000_000.0 * price
}
