use std::sync::Arc;

use aferir_bedrock::generator::BedrockNarrator;
use aferir_storage::store::S3SessionStore;

/// Shared application state, injected into all route handlers via Axum state.
///
/// Generic over the store and narrator so the router can run against the
/// in-memory store in tests.
pub struct AppState<S, N> {
    pub store: Arc<S>,
    /// `None` when narrative generation is not configured.
    pub narrator: Option<Arc<N>>,
    pub system_prompt: Arc<str>,
}

impl<S, N> AppState<S, N> {
    pub fn new(store: S, narrator: Option<N>, system_prompt: impl Into<Arc<str>>) -> Self {
        Self {
            store: Arc::new(store),
            narrator: narrator.map(Arc::new),
            system_prompt: system_prompt.into(),
        }
    }
}

impl<S, N> Clone for AppState<S, N> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            narrator: self.narrator.clone(),
            system_prompt: Arc::clone(&self.system_prompt),
        }
    }
}

pub type LiveState = AppState<S3SessionStore, BedrockNarrator>;
