use std::str::FromStr;

use anyhow::Context;
use lambda_runtime::tracing;
use mime::Mime;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use super::ASSEMBLYLINE_PATH;
use crate::model::{ScanPayload, ScanResponse};

pub(in crate::service::scan_files) async fn start_scan(
    client: &reqwest::Client,
    url: &str,
    payload: ScanPayload,
) -> anyhow::Result<ScanResponse> {
    let full_url = format!("{url}{ASSEMBLYLINE_PATH}");
    tracing::trace!(
        url = %full_url,
        file_name = %payload.file_name,
        size = payload.bytes.len(),
        "starting scan"
    );

    let part = Part::bytes(payload.bytes).file_name(payload.file_name);
    let part = match declared_mime(payload.content_type.as_deref()) {
        Some(mime) => part.mime_str(mime.as_ref())?,
        None => part,
    };
    let form = Form::new().part("file", part);

    let res = client
        .post(&full_url)
        .multipart(form)
        .send()
        .await
        .context("could not reach scan files api")?;

    let status_code = res.status();
    let text = res
        .text()
        .await
        .context("could not read scan files api response")?;

    if !status_code.is_success() {
        tracing::warn!(
            body=%text,
            status=%status_code,
            "unexpected response from scan files api"
        );
    }

    Ok(ScanResponse {
        status_code: status_code.as_u16(),
        body: parse_body(&text),
    })
}

/// The declared content type of the object, if it is a valid mime type.
/// s3 accepts any string as a content type, the part is sent untyped when it does not parse.
pub(in crate::service::scan_files) fn declared_mime(content_type: Option<&str>) -> Option<Mime> {
    let content_type = content_type?;
    match Mime::from_str(content_type) {
        Ok(mime) => Some(mime),
        Err(e) => {
            tracing::warn!(
                content_type,
                error = %e,
                "declared content type is not a mime type, sending the file untyped"
            );
            None
        }
    }
}

/// An empty body is `null`, a body that is not json is kept as a json string
pub(in crate::service::scan_files) fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }

    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
