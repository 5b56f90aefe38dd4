use std::time::Duration;

use scan_env::Environment;
use thiserror::Error;

use crate::{model::PayloadMode, service::scan_files::Timeouts};

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigErr {
    #[error("{0} must be provided")]
    Missing(&'static str),
    #[error("{var} has an invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// The configuration parameters for the lambda, pulled from environment variables.
///
/// See `.env.sample` in the handler root for details.
#[derive(Debug, Clone)]
pub struct Config {
    /// The environment we are in
    pub environment: Environment,

    /// Base url of the Scan Files API, without a trailing slash
    pub scan_files_url: String,

    /// The ssm parameter holding the Scan Files API key.
    /// In the local environment this is the api key itself
    pub api_key_parameter_name: String,

    /// Overrides the region of the aws clients
    pub region: Option<String>,

    pub connect_timeout: Duration,

    pub request_timeout: Duration,

    /// What part of the object is sent to the Scan Files API
    pub payload_mode: PayloadMode,
}

impl Config {
    /// The [Environment] comes from the entrypoint so logging and config always agree on it
    pub fn from_env(environment: Environment) -> Result<Self, ConfigErr> {
        Self::from_lookup(environment, |var| std::env::var(var).ok())
    }

    /// Builds the config from anything that can resolve an environment variable name
    pub fn from_lookup<F>(environment: Environment, lookup: F) -> Result<Self, ConfigErr>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |var: &'static str| lookup(var).filter(|value| !value.trim().is_empty());
        let required = |var: &'static str| optional(var).ok_or(ConfigErr::Missing(var));
        let seconds = |var: &'static str, default: u64| -> Result<Duration, ConfigErr> {
            match optional(var) {
                None => Ok(Duration::from_secs(default)),
                Some(value) => match value.trim().parse::<u64>() {
                    Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
                    _ => Err(ConfigErr::Invalid { var, value }),
                },
            }
        };

        let scan_files_url = required("SCAN_FILES_URL")?
            .trim_end_matches('/')
            .to_string();
        let api_key_parameter_name = required("SCAN_FILES_API_KEY_PARAMETER_NAME")?;
        let region = optional("REGION");
        let connect_timeout = seconds(
            "SCAN_FILES_CONNECT_TIMEOUT_SECS",
            DEFAULT_CONNECT_TIMEOUT_SECS,
        )?;
        let request_timeout = seconds(
            "SCAN_FILES_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        let payload_mode = match optional("SCAN_FILES_PAYLOAD") {
            None => PayloadMode::default(),
            Some(value) => value.parse().map_err(|_| ConfigErr::Invalid {
                var: "SCAN_FILES_PAYLOAD",
                value,
            })?,
        };

        Ok(Config {
            environment,
            scan_files_url,
            api_key_parameter_name,
            region,
            connect_timeout,
            request_timeout,
            payload_mode,
        })
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            connect: self.connect_timeout,
            request: self.request_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use cool_asserts::assert_matches;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigErr> {
        config_for(Environment::Production, vars)
    }

    fn config_for(environment: Environment, vars: &[(&str, &str)]) -> Result<Config, ConfigErr> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(environment, |var| vars.get(var).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("SCAN_FILES_URL", "https://scan-files.example.com/"),
        ("SCAN_FILES_API_KEY_PARAMETER_NAME", "/scan-files/api-key"),
    ];

    #[test]
    fn it_applies_defaults() {
        let config = config(&REQUIRED).unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.scan_files_url, "https://scan-files.example.com");
        assert_eq!(config.api_key_parameter_name, "/scan-files/api-key");
        assert_eq!(config.region, None);
        assert_eq!(
            config.timeouts(),
            Timeouts {
                connect: Duration::from_secs(5),
                request: Duration::from_secs(30),
            }
        );
        assert_eq!(config.payload_mode, PayloadMode::Content);
    }

    #[test]
    fn it_reads_every_option() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("REGION", "ca-central-1"),
            ("SCAN_FILES_CONNECT_TIMEOUT_SECS", "2"),
            ("SCAN_FILES_REQUEST_TIMEOUT_SECS", "10"),
            ("SCAN_FILES_PAYLOAD", "content_type"),
        ]);

        let config = config_for(Environment::Local, &vars).unwrap();

        assert_eq!(config.environment, Environment::Local);
        assert_eq!(config.region.as_deref(), Some("ca-central-1"));
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.payload_mode, PayloadMode::ContentType);
    }

    #[test]
    fn it_keeps_the_entrypoint_environment_over_the_variable() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("ENVIRONMENT", "prod"));

        assert_eq!(
            config_for(Environment::Local, &vars).unwrap().environment,
            Environment::Local
        );
    }

    #[test]
    fn it_requires_the_scan_files_url() {
        assert_matches!(
            config(&[("SCAN_FILES_API_KEY_PARAMETER_NAME", "/scan-files/api-key")]),
            Err(ConfigErr::Missing("SCAN_FILES_URL"))
        );
    }

    #[test]
    fn it_treats_blank_values_as_missing() {
        assert_matches!(
            config(&[
                ("SCAN_FILES_URL", "https://scan-files.example.com"),
                ("SCAN_FILES_API_KEY_PARAMETER_NAME", "  "),
            ]),
            Err(ConfigErr::Missing("SCAN_FILES_API_KEY_PARAMETER_NAME"))
        );
    }

    #[test]
    fn it_rejects_invalid_timeouts() {
        for value in ["soon", "-1", "0"] {
            let mut vars = REQUIRED.to_vec();
            vars.push(("SCAN_FILES_REQUEST_TIMEOUT_SECS", value));

            assert_matches!(
                config(&vars),
                Err(ConfigErr::Invalid { var: "SCAN_FILES_REQUEST_TIMEOUT_SECS", value: v }) => {
                    assert_eq!(v, value);
                }
            );
        }
    }

    #[test]
    fn it_rejects_unknown_payload_modes() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("SCAN_FILES_PAYLOAD", "metadata"));

        assert_matches!(
            config(&vars),
            Err(ConfigErr::Invalid {
                var: "SCAN_FILES_PAYLOAD",
                ..
            })
        );
    }
}
