use std::future::Future;

use aws_sdk_bedrockruntime::Client;

use aferir_core::models::narrative::Narrative;

use crate::error::NarrativeError;
use crate::narrative::{self, TransactionResult};

/// Anything that can turn a prompt into a [`Narrative`].
pub trait NarrativeGenerator: Send + Sync {
    fn model_id(&self) -> &str;

    fn generate(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> impl Future<Output = Result<TransactionResult<Narrative>, NarrativeError>> + Send;
}

/// Narratives from a Bedrock model via the Converse API.
#[derive(Clone)]
pub struct BedrockNarrator {
    client: Client,
    model_id: String,
}

impl BedrockNarrator {
    pub fn new(client: Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }
}

impl NarrativeGenerator for BedrockNarrator {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<TransactionResult<Narrative>, NarrativeError> {
        narrative::generate_narrative(&self.client, &self.model_id, system_prompt, user_message).await
    }
}
