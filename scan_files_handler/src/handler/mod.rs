
use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{
    Error, LambdaEvent,
    tracing::{self},
};

use crate::{
    context::Context,
    error::ScanFilesErr,
    model::{PayloadMode, ScanFilesResponse, ScanPayload, StorageEvent, TagSet},
};

/// Processes the s3 event
#[tracing::instrument(skip(ctx, event), fields(request_id = %event.context.request_id))]
pub async fn handler(
    ctx: Context,
    event: LambdaEvent<S3Event>,
) -> Result<ScanFilesResponse, Error> {
    process(&ctx, &event.payload).await.map_err(|e| {
        tracing::error!(error=?e, "unable to scan object");
        Error::from(e)
    })
}

/// Scans the object named by the first record of the event and tags it with the outcome.
/// The tags are written exactly once, after the Scan Files API has responded.
#[tracing::instrument(skip_all)]
pub async fn process(ctx: &Context, event: &S3Event) -> Result<ScanFilesResponse, ScanFilesErr> {
    let StorageEvent { bucket, object_key } = StorageEvent::try_from(event)?;
    tracing::info!(bucket = %bucket, key = %object_key, "scanning object");

    let payload = fetch_payload(ctx, &bucket, &object_key).await?;

    let response = ctx
        .scan_files_client
        .start_scan(payload)
        .await
        .map_err(ScanFilesErr::Dispatch)?;
    tracing::trace!(status = response.status_code, "scan files api responded");

    let tags = TagSet::for_scan_response(&response)?;
    tracing::info!(scan_status = ?tags.scan_status(), "tagging object");

    ctx.s3_client
        .put_object_tagging(&bucket, &object_key, tags)
        .await
        .map_err(ScanFilesErr::TaggingFailed)?;

    Ok(response.into())
}

#[tracing::instrument(skip(ctx))]
async fn fetch_payload(
    ctx: &Context,
    bucket: &str,
    object_key: &str,
) -> Result<ScanPayload, ScanFilesErr> {
    match ctx.config.payload_mode {
        PayloadMode::Content => {
            let object = ctx.s3_client.get_object(bucket, object_key).await?;
            Ok(ScanPayload::from_object(object_key, object))
        }
        PayloadMode::ContentType => {
            let content_type = ctx.s3_client.get_content_type(bucket, object_key).await?;
            Ok(ScanPayload::from_content_type(object_key, content_type))
        }
    }
}
