//! Raw S3 object operations.

use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::Client;
use aws_smithy_types::byte_stream::ByteStream;

use crate::error::StorageError;

const JSON: &str = "application/json";

/// Body and ETag of a fetched object.
pub struct GetObjectOutput {
    pub body: Vec<u8>,
    pub etag: Option<String>,
}

/// Write precondition for [`put_object`].
#[derive(Debug, Clone, Copy)]
pub enum PutCondition<'a> {
    /// Unconditional overwrite.
    Always,
    /// `If-None-Match: *`: the key must not exist yet.
    IfAbsent,
    /// `If-Match`: the stored ETag must still be this one.
    IfMatch(&'a str),
}

pub async fn get_object(client: &Client, bucket: &str, key: &str) -> Result<GetObjectOutput, StorageError> {
    let resp = client.get_object().bucket(bucket).key(key).send().await.map_err(|e| {
        let err = e.into_service_error();
        if err.is_no_such_key() {
            StorageError::NotFound { key: key.to_string() }
        } else {
            StorageError::s3("GetObject", err)
        }
    })?;

    let etag = resp.e_tag().map(str::to_string);
    let bytes = resp
        .body
        .collect()
        .await
        .map_err(|e| StorageError::s3("GetObject", e))?;

    Ok(GetObjectOutput {
        body: bytes.into_bytes().to_vec(),
        etag,
    })
}

/// Write a JSON object under `condition`. Returns the new ETag.
///
/// A failed `IfAbsent` is `AlreadyExists`; a failed `IfMatch` is
/// `PreconditionFailed`.
pub async fn put_object(
    client: &Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    condition: PutCondition<'_>,
) -> Result<String, StorageError> {
    let req = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_type(JSON)
        .body(ByteStream::from(body));

    let req = match condition {
        PutCondition::Always => req,
        PutCondition::IfAbsent => req.if_none_match("*"),
        PutCondition::IfMatch(etag) => req.if_match(etag),
    };

    let resp = req.send().await.map_err(|e| {
        let err = e.into_service_error();
        // 412 when the precondition fails, 409 when a concurrent
        // conditional write to the same key is still in flight.
        let conflict = matches!(err.code(), Some("PreconditionFailed" | "ConditionalRequestConflict"));
        match condition {
            PutCondition::IfAbsent if conflict => StorageError::AlreadyExists { key: key.to_string() },
            PutCondition::IfMatch(_) if conflict => StorageError::PreconditionFailed { key: key.to_string() },
            _ => StorageError::s3("PutObject", err),
        }
    })?;

    Ok(resp.e_tag().unwrap_or_default().to_string())
}

/// Every key under `prefix`, across all result pages.
pub async fn list_objects(client: &Client, bucket: &str, prefix: &str) -> Result<Vec<String>, StorageError> {
    let mut pages = client
        .list_objects_v2()
        .bucket(bucket)
        .prefix(prefix)
        .into_paginator()
        .send();

    let mut keys = Vec::new();
    while let Some(page) = pages.next().await {
        let page = page.map_err(|e| StorageError::s3("ListObjectsV2", e.into_service_error()))?;
        keys.extend(page.contents().iter().filter_map(|obj| obj.key()).map(str::to_string));
    }
    Ok(keys)
}
