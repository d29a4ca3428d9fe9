use aws_sdk_s3::Client as S3Client;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use aferir_bedrock::generator::BedrockNarrator;
use aferir_bedrock::prompt::DEFAULT_SYSTEM_PROMPT;
use aferir_core::keys;
use aferir_storage::error::StorageError;
use aferir_storage::objects;
use aferir_storage::store::S3SessionStore;

mod config;
mod error;
mod middleware;
mod routes;
mod state;
mod workflow;

use config::ServiceConfig;
use state::{AppState, LiveState};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ServiceConfig::from_env();
    info!(
        bucket = %config.bucket,
        region = %config.region,
        narrative_model = config.narrative_model_id.as_deref().unwrap_or("disabled"),
        "starting aferir api"
    );

    // A broken built-in definition is a deployment error, not a request error.
    for instrument in aferir_instruments::all_instruments() {
        instrument.definition().validate()?;
    }

    let s3 = aferir_storage::client::build_client().await;
    let system_prompt = load_system_prompt(&s3, &config.bucket).await;

    let narrator = match &config.narrative_model_id {
        Some(model_id) => {
            let client = aferir_bedrock::client::build_client_with_region(&config.region).await;
            Some(BedrockNarrator::new(client, model_id.clone()))
        }
        None => None,
    };

    let state: LiveState = AppState::new(S3SessionStore::new(s3, config.bucket), narrator, system_prompt);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router(state).layer(cors);

    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}

/// The narrative system prompt stored in the bucket, or the built-in one.
async fn load_system_prompt(client: &S3Client, bucket: &str) -> String {
    match objects::get_object(client, bucket, keys::SYSTEM_PROMPT).await {
        Ok(output) => match String::from_utf8(output.body) {
            Ok(prompt) if !prompt.trim().is_empty() => prompt,
            Ok(_) => {
                warn!(key = keys::SYSTEM_PROMPT, "stored system prompt is empty, using built-in default");
                DEFAULT_SYSTEM_PROMPT.to_string()
            }
            Err(e) => {
                warn!(key = keys::SYSTEM_PROMPT, error = %e, "stored system prompt is not UTF-8, using built-in default");
                DEFAULT_SYSTEM_PROMPT.to_string()
            }
        },
        Err(StorageError::NotFound { .. }) => {
            info!("no system prompt in bucket, using built-in default");
            DEFAULT_SYSTEM_PROMPT.to_string()
        }
        Err(e) => {
            warn!(error = %e, "system prompt could not be loaded, using built-in default");
            DEFAULT_SYSTEM_PROMPT.to_string()
        }
    }
}
