mod get;
mod head;
mod tagging;

use aws_sdk_s3::{
    self as s3,
    config::http::HttpResponse,
    error::{ProvideErrorMetadata, SdkError},
};
use lambda_runtime::tracing;
#[allow(unused_imports)]
use mockall::automock;
use thiserror::Error;

use crate::model::{StoredObject, TagSet};

#[cfg(test)]
pub use MockS3Client as S3;
#[cfg(not(test))]
pub use S3Client as S3;

#[derive(Debug, Error)]
pub enum ObjectStoreErr {
    #[error("object {key} does not exist in bucket {bucket}")]
    NotFound { bucket: String, key: String },
    #[error("access denied to object {key} in bucket {bucket}")]
    AccessDenied { bucket: String, key: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Clone, Debug)]
pub struct S3Client {
    /// Inner S3 client
    inner: s3::Client,
}

impl S3Client {
    pub fn new(inner: s3::Client) -> Self {
        Self { inner }
    }
}

#[cfg_attr(test, automock)]
impl S3Client {
    /// Retrieves the bytes and declared content type of the object
    #[tracing::instrument(skip(self))]
    pub async fn get_object(&self, bucket: &str, key: &str) -> Result<StoredObject, ObjectStoreErr> {
        get::get_object(&self.inner, bucket, key).await
    }

    /// Retrieves only the declared content type of the object
    #[tracing::instrument(skip(self))]
    pub async fn get_content_type(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<Option<String>, ObjectStoreErr> {
        head::get_content_type(&self.inner, bucket, key).await
    }

    /// Replaces the tag set of the object
    #[tracing::instrument(skip(self))]
    pub async fn put_object_tagging(
        &self,
        bucket: &str,
        key: &str,
        tags: TagSet,
    ) -> anyhow::Result<()> {
        tagging::put_object_tagging(&self.inner, bucket, key, tags).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureKind {
    NotFound,
    AccessDenied,
    Other,
}

fn failure_kind(status: Option<u16>, code: Option<&str>) -> FailureKind {
    match (status, code) {
        (Some(404), _) | (_, Some("NoSuchKey" | "NotFound")) => FailureKind::NotFound,
        (Some(403), _) | (_, Some("AccessDenied" | "Forbidden")) => FailureKind::AccessDenied,
        _ => FailureKind::Other,
    }
}

/// Sorts a failed object request into the errors the handler distinguishes
fn object_store_err<E>(err: SdkError<E, HttpResponse>, bucket: &str, key: &str) -> ObjectStoreErr
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let status = err.raw_response().map(|response| response.status().as_u16());
    match failure_kind(status, err.code()) {
        FailureKind::NotFound => ObjectStoreErr::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        },
        FailureKind::AccessDenied => ObjectStoreErr::AccessDenied {
            bucket: bucket.to_string(),
            key: key.to_string(),
        },
        FailureKind::Other => ObjectStoreErr::Other(
            anyhow::Error::new(err).context(format!("could not get item {key} from bucket {bucket}")),
        ),
    }
}
