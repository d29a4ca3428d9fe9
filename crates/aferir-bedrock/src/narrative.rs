use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message, SystemContentBlock,
};
use tracing::info;
use uuid::Uuid;

use aferir_core::models::narrative::{Narrative, SessionNarrative};
use aferir_core::models::token_count::TokenUsage;
use aferir_core::models::transaction::{NarrativeTransaction, TransactionStatus};

use crate::error::NarrativeError;
use crate::tokens;

/// The result of a Bedrock call, before it is persisted.
#[derive(Debug, Clone)]
pub struct TransactionResult<T> {
    pub id: Uuid,
    pub model_id: String,
    pub usage: TokenUsage,
    pub status: TransactionStatus,
    pub output: T,
}

impl TransactionResult<Narrative> {
    /// Split into the documents stored for `session_id`.
    pub fn into_records(self, session_id: Uuid, now: jiff::Timestamp) -> (SessionNarrative, NarrativeTransaction) {
        let transaction = NarrativeTransaction {
            id: self.id,
            session_id,
            model_id: self.model_id,
            usage: self.usage,
            status: self.status,
            error: None,
            created_at: now,
        };
        let narrative = SessionNarrative {
            session_id,
            transaction_id: self.id,
            narrative: self.output,
            created_at: now,
        };
        (narrative, transaction)
    }
}

/// Ask the model for a descriptive report on a scored session.
///
/// `user_message` carries the structured result; the system prompt
/// instructs the model to answer with a `Narrative` JSON object.
pub async fn generate_narrative(
    client: &Client,
    model_id: &str,
    system_prompt: &str,
    user_message: &str,
) -> Result<TransactionResult<Narrative>, NarrativeError> {
    let transaction_id = Uuid::new_v4();
    info!(transaction_id = %transaction_id, model = model_id, "starting narrative generation");

    let (response_text, usage) = invoke_converse(client, model_id, system_prompt, user_message).await?;
    let narrative = parse_narrative(&response_text)?;

    info!(
        transaction_id = %transaction_id,
        input_tokens = usage.tokens.input,
        output_tokens = usage.tokens.output,
        "narrative generation complete"
    );

    Ok(TransactionResult {
        id: transaction_id,
        model_id: model_id.to_string(),
        usage,
        status: TransactionStatus::Complete,
        output: narrative,
    })
}

/// Parse model output as a [`Narrative`].
///
/// Models sometimes wrap the object in a markdown fence or add a sentence
/// around it, so only the outermost `{ ... }` span is parsed.
pub fn parse_narrative(response_text: &str) -> Result<Narrative, NarrativeError> {
    let json = extract_json_object(response_text)
        .ok_or_else(|| NarrativeError::NotJson(response_text.to_string()))?;

    let narrative: Narrative = serde_json::from_str(json).map_err(|e| {
        NarrativeError::SchemaViolation(format!("failed to parse Narrative: {e}. Response: {response_text}"))
    })?;

    if narrative.summary.trim().is_empty() {
        return Err(NarrativeError::SchemaViolation("narrative summary is empty".to_string()));
    }
    Ok(narrative)
}

fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

const MAX_OUTPUT_TOKENS: i32 = 2048;
const TEMPERATURE: f32 = 0.3;

/// Core invocation using the Bedrock Converse API.
/// Returns the response text and token usage.
async fn invoke_converse(
    client: &Client,
    model_id: &str,
    system_prompt: &str,
    user_message: &str,
) -> Result<(String, TokenUsage), NarrativeError> {
    let response = client
        .converse()
        .model_id(model_id)
        .system(SystemContentBlock::Text(system_prompt.to_string()))
        .inference_config(
            InferenceConfiguration::builder()
                .max_tokens(MAX_OUTPUT_TOKENS)
                .temperature(TEMPERATURE)
                .build(),
        )
        .messages(
            Message::builder()
                .role(ConversationRole::User)
                .content(ContentBlock::Text(user_message.to_string()))
                .build()
                .map_err(|e| NarrativeError::Invocation(e.to_string()))?,
        )
        .send()
        .await
        .map_err(|e| NarrativeError::Invocation(e.into_service_error().to_string()))?;

    let output_message = response
        .output()
        .and_then(|o| o.as_message().ok())
        .ok_or(NarrativeError::EmptyResponse)?;

    // Text blocks only; anything else the model emits is ignored.
    let response_text: String = output_message
        .content()
        .iter()
        .filter_map(|block| block.as_text().ok())
        .map(String::as_str)
        .collect();

    let token_count = response
        .usage()
        .map(tokens::token_count)
        .unwrap_or_default();

    Ok((response_text, tokens::priced_usage(model_id, token_count)))
}

