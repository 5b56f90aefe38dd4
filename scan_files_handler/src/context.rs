use std::sync::Arc;

use anyhow::Context as _;
use lambda_runtime::tracing;

use crate::{
    config::Config,
    service::{self, s3::S3, scan_files::ScanFiles, ssm::SSM},
};

/// Everything an invocation needs, built once per cold start.
/// The Scan Files API key lives inside the scan files client and is never refetched.
#[derive(Clone)]
pub struct Context {
    pub s3_client: Arc<S3>,
    pub scan_files_client: Arc<ScanFiles>,
    pub config: Config,
}

impl Context {
    /// Resolves the Scan Files API key and hands it to `scan_files_client` to build the client
    /// which carries it for the life of the process.
    #[tracing::instrument(err, skip_all)]
    pub async fn build<F>(
        ssm: &SSM,
        s3_client: S3,
        config: Config,
        scan_files_client: F,
    ) -> anyhow::Result<Self>
    where
        F: FnOnce(&str, &Config) -> anyhow::Result<ScanFiles>,
    {
        let api_key = service::ssm::api_key(
            ssm,
            config.environment,
            &config.api_key_parameter_name,
        )
        .await
        .context("failed to resolve the scan files api key")?;
        tracing::trace!("resolved scan files api key");

        let scan_files_client = scan_files_client(&api_key, &config)
            .context("failed to build the scan files client")?;

        Ok(Self {
            s3_client: Arc::new(s3_client),
            scan_files_client: Arc::new(scan_files_client),
            config,
        })
    }
}
