use aws_config::{BehaviorVersion, Region};
use aws_sdk_bedrockruntime::Client;

pub async fn build_client() -> Client {
    let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
    Client::new(&config)
}

/// Build a runtime client pinned to `region`. Bedrock model availability
/// differs per region, so the service configures it explicitly.
pub async fn build_client_with_region(region: &str) -> Client {
    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await;
    Client::new(&config)
}
