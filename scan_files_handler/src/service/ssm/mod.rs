use std::sync::Arc;

use aws_sdk_ssm as ssm;
use lambda_runtime::tracing;
#[allow(unused_imports)]
use mockall::automock;
use scan_env::Environment;
use thiserror::Error;

#[cfg(test)]
pub use MockSsmClient as SSM;
#[cfg(not(test))]
pub use SsmClient as SSM;

#[derive(Debug, Error)]
pub enum SecretErr {
    #[error("{0:?}")]
    AwsErr(#[from] ssm::Error),
    #[error("The parameter {0} has no value")]
    NotPresent(String),
}

#[derive(Clone, Debug)]
pub struct SsmClient {
    inner: ssm::Client,
}

impl SsmClient {
    pub fn new(inner: ssm::Client) -> Self {
        Self { inner }
    }
}

#[cfg_attr(test, automock)]
impl SsmClient {
    /// Reads a decrypted parameter from the parameter store
    #[tracing::instrument(err, skip(self))]
    pub async fn get_parameter(&self, name: &str) -> Result<Arc<str>, SecretErr> {
        let result = self
            .inner
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
            .map_err(ssm::Error::from)?;

        result
            .parameter()
            .and_then(|parameter| parameter.value())
            .map(Arc::from)
            .ok_or_else(|| SecretErr::NotPresent(name.to_string()))
    }
}

/// Resolves the Scan Files API key.
/// If we are in local mode the parameter name is the key itself,
/// in dev or production the key is read from the parameter store.
#[tracing::instrument(err, skip(ssm, parameter_name))]
pub async fn api_key(
    ssm: &SSM,
    environment: Environment,
    parameter_name: &str,
) -> Result<Arc<str>, SecretErr> {
    match environment {
        Environment::Local => Ok(Arc::from(parameter_name)),
        Environment::Production | Environment::Develop => ssm.get_parameter(parameter_name).await,
    }
}
