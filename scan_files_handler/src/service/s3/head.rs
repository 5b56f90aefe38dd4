use aws_sdk_s3 as s3;
use lambda_runtime::tracing;

use super::ObjectStoreErr;

#[tracing::instrument(skip(client))]
pub(in crate::service::s3) async fn get_content_type(
    client: &s3::Client,
    bucket: &str,
    key: &str,
) -> Result<Option<String>, ObjectStoreErr> {
    let resp = client
        .head_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| super::object_store_err(e, bucket, key))?;

    Ok(resp.content_type().map(str::to_string))
}
