use anyhow::Context;
use aws_sdk_s3 as s3;
use lambda_runtime::tracing;
use s3::types::{Tag as S3Tag, Tagging};

use crate::model::TagSet;

/// Overwrites the tag set of the object with `tags`
#[tracing::instrument(skip(client))]
pub(in crate::service::s3) async fn put_object_tagging(
    client: &s3::Client,
    bucket: &str,
    key: &str,
    tags: TagSet,
) -> anyhow::Result<()> {
    let tag_set = tags
        .into_iter()
        .map(|tag| {
            S3Tag::builder()
                .key(tag.key)
                .value(tag.value)
                .build()
                .context("building Tag")
        })
        .collect::<anyhow::Result<Vec<S3Tag>>>()?;

    let tagging = Tagging::builder()
        .set_tag_set(Some(tag_set))
        .build()
        .context("building Tagging")?;

    client
        .put_object_tagging()
        .bucket(bucket)
        .key(key)
        .tagging(tagging)
        .send()
        .await
        .context(format!("could not tag item {key} in bucket {bucket}"))?;

    Ok(())
}
