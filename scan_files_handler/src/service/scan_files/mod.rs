mod start_scan;

use std::time::Duration;

use anyhow::Context;
use lambda_runtime::tracing;
#[allow(unused_imports)]
use mockall::automock;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};

use crate::model::{ScanPayload, ScanResponse};

#[cfg(test)]
pub use MockScanFilesClient as ScanFiles;
#[cfg(not(test))]
pub use ScanFilesClient as ScanFiles;

pub(crate) static ASSEMBLYLINE_PATH: &str = "/assemblyline";

/// Network limits for requests to the Scan Files API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Duration,
    pub request: Duration,
}

/// Client for the Scan Files API.
/// The api key is attached to every request as the `Authorization` header.
#[derive(Clone, Debug)]
pub struct ScanFilesClient {
    url: String,
    client: reqwest::Client,
}

impl ScanFilesClient {
    pub fn new(url: &str, api_key: &str, timeouts: Timeouts) -> anyhow::Result<Self> {
        Self::from_builder(url, client_builder(api_key, timeouts)?)
    }

    fn from_builder(url: &str, builder: reqwest::ClientBuilder) -> anyhow::Result<Self> {
        let client = builder.build().context("could not build http client")?;

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

fn client_builder(api_key: &str, timeouts: Timeouts) -> anyhow::Result<reqwest::ClientBuilder> {
    let mut authorization =
        HeaderValue::from_str(api_key).context("api key is not a valid header value")?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Ok(reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(timeouts.connect)
        .timeout(timeouts.request))
}

#[cfg_attr(test, automock)]
impl ScanFilesClient {
    /// Submits the payload for scanning. Any completed response is returned as is,
    /// only transport failures are errors.
    #[tracing::instrument(skip(self, payload))]
    pub async fn start_scan(&self, payload: ScanPayload) -> anyhow::Result<ScanResponse> {
        start_scan::start_scan(&self.client, &self.url, payload).await
    }
}
