use std::path::PathBuf;

use reqwest::Url;

use crate::core::config::data::{Config, DEFAULT_ENDPOINT, ENDPOINT_ENV};
use crate::core::config::io::ConfigError;
use crate::utils::url::parse_endpoint;

/// Values supplied outside the config file, highest precedence first.
#[derive(Debug, Default, Clone)]
pub struct SettingsOverrides {
    pub endpoint_flag: Option<String>,
    pub endpoint_env: Option<String>,
    pub log_flag: Option<PathBuf>,
}

impl SettingsOverrides {
    pub fn from_env(endpoint_flag: Option<String>, log_flag: Option<PathBuf>) -> Self {
        Self {
            endpoint_flag,
            endpoint_env: std::env::var(ENDPOINT_ENV).ok(),
            log_flag,
        }
    }
}

/// Everything a session needs, after precedence has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSettings {
    pub endpoint: Url,
    pub log_file: Option<PathBuf>,
}

/// Endpoint: flag, then environment, then config, then the default.
/// Log file: flag, then config. Blank values are skipped.
pub fn resolve_settings(
    config: &Config,
    overrides: &SettingsOverrides,
) -> Result<ChatSettings, ConfigError> {
    let raw_endpoint = [
        overrides.endpoint_flag.as_deref(),
        overrides.endpoint_env.as_deref(),
        config.endpoint.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find(|value| !value.trim().is_empty())
    .unwrap_or(DEFAULT_ENDPOINT);

    let endpoint = parse_endpoint(raw_endpoint).map_err(|reason| ConfigError::InvalidEndpoint {
        value: raw_endpoint.to_string(),
        reason,
    })?;

    let log_file = overrides
        .log_flag
        .clone()
        .or_else(|| config.log_file.clone())
        .filter(|path| !path.as_os_str().is_empty());

    Ok(ChatSettings { endpoint, log_file })
}
