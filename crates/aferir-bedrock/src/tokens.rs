//! Token accounting for Converse calls.

use aferir_core::models::cost::ModelPricing;
use aferir_core::models::token_count::{TokenCount, TokenUsage};

pub fn token_count(usage: &aws_sdk_bedrockruntime::types::TokenUsage) -> TokenCount {
    // The SDK reports counts as i32.
    TokenCount {
        input: u64::try_from(usage.input_tokens).unwrap_or(0),
        output: u64::try_from(usage.output_tokens).unwrap_or(0),
    }
}

/// Usage for a call, priced when the model is known.
pub fn priced_usage(model_id: &str, tokens: TokenCount) -> TokenUsage {
    get_pricing(model_id)
        .map(|pricing| pricing.usage(tokens))
        .unwrap_or_else(|| TokenUsage::unpriced(tokens))
}

/// USD list prices per million tokens, matched on the model family in the
/// id so regional inference profiles resolve too.
pub fn get_pricing(model_id: &str) -> Option<ModelPricing> {
    const FAMILIES: &[(&str, f64, f64)] = &[
        ("claude-opus-4", 15.0, 75.0),
        ("claude-sonnet-4", 3.0, 15.0),
        ("claude-haiku", 0.80, 4.0),
        ("nova-pro", 0.80, 3.20),
        ("nova-lite", 0.06, 0.24),
    ];

    FAMILIES
        .iter()
        .find(|(family, _, _)| model_id.contains(family))
        .map(|&(_, input_per_million, output_per_million)| ModelPricing {
            input_per_million,
            output_per_million,
        })
}
