use std::env;

const DEFAULT_BUCKET: &str = "aferir";
const DEFAULT_REGION: &str = "us-east-1";

/// Service settings read from the environment at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Bucket holding sessions, results, narratives and the system prompt.
    pub bucket: String,
    /// Narrative generation is disabled when unset.
    pub narrative_model_id: Option<String>,
    pub region: String,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            bucket: var("AFERIR_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            narrative_model_id: var("AFERIR_NARRATIVE_MODEL_ID"),
            region: var("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
        }
    }
}
