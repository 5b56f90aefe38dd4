use anyhow::Context;
use aws_sdk_s3 as s3;
use lambda_runtime::tracing;

use super::ObjectStoreErr;
use crate::model::StoredObject;

/// Gets a given item from the bucket
#[tracing::instrument(skip(client))]
pub(in crate::service::s3) async fn get_object(
    client: &s3::Client,
    bucket: &str,
    key: &str,
) -> Result<StoredObject, ObjectStoreErr> {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| super::object_store_err(e, bucket, key))?;

    let content_type = resp.content_type().map(str::to_string);

    let body = resp
        .body
        .collect()
        .await
        .context("could not collect body")?;

    let content = body.into_bytes().to_vec();
    tracing::trace!(content_length = content.len(), "retrieved object");

    Ok(StoredObject {
        content,
        content_type,
    })
}
