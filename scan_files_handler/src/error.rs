use thiserror::Error;

use crate::service::s3::ObjectStoreErr;

/// Every way a single invocation of the handler can fail.
/// None of these are retried by the handler, they are surfaced to the lambda runtime.
#[derive(Debug, Error)]
pub enum ScanFilesErr {
    #[error("malformed s3 event: {0}")]
    MalformedEvent(&'static str),
    #[error("object {key} does not exist in bucket {bucket}")]
    ObjectNotFound { bucket: String, key: String },
    #[error("access denied to object {key} in bucket {bucket}")]
    AccessDenied { bucket: String, key: String },
    #[error("unable to fetch object: {0:?}")]
    ObjectStore(anyhow::Error),
    #[error("unable to dispatch scan: {0:?}")]
    Dispatch(anyhow::Error),
    #[error("scan files api accepted the scan but did not return a scan_id")]
    MissingScanId,
    #[error("unable to tag object: {0:?}")]
    TaggingFailed(anyhow::Error),
}

impl From<ObjectStoreErr> for ScanFilesErr {
    fn from(err: ObjectStoreErr) -> Self {
        match err {
            ObjectStoreErr::NotFound { bucket, key } => ScanFilesErr::ObjectNotFound { bucket, key },
            ObjectStoreErr::AccessDenied { bucket, key } => {
                ScanFilesErr::AccessDenied { bucket, key }
            }
            ObjectStoreErr::Other(e) => ScanFilesErr::ObjectStore(e),
        }
    }
}
