//! JSON documents on top of [`crate::objects`], carried with their ETag.

use aws_sdk_s3::Client;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;
use crate::objects::{self, PutCondition};

/// A stored JSON document together with the ETag it was read at.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub value: T,
    pub etag: String,
}

pub async fn load_state<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<Versioned<T>, StorageError> {
    let output = objects::get_object(client, bucket, key).await?;
    Ok(Versioned {
        value: serde_json::from_slice(&output.body)?,
        etag: output.etag.unwrap_or_default(),
    })
}

/// Overwrite unconditionally. Returns the new ETag.
pub async fn save_state<T: Serialize>(client: &Client, bucket: &str, key: &str, value: &T) -> Result<String, StorageError> {
    write(client, bucket, key, value, PutCondition::Always).await
}

/// Overwrite only if nobody wrote since `expected_etag` was read.
pub async fn save_state_if_match<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
    expected_etag: &str,
) -> Result<String, StorageError> {
    write(client, bucket, key, value, PutCondition::IfMatch(expected_etag)).await
}

/// Create a document that must not exist yet.
pub async fn create_state<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
) -> Result<String, StorageError> {
    write(client, bucket, key, value, PutCondition::IfAbsent).await
}

async fn write<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
    condition: PutCondition<'_>,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    objects::put_object(client, bucket, key, body, condition).await
}
