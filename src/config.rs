use std::env;
use std::time::Duration;

use crate::error::ConfigError;

const API_URL_VAR: &str = "BALLOT_API_URL";
const API_TOKEN_VAR: &str = "BALLOT_API_TOKEN";
const API_TIMEOUT_VAR: &str = "BALLOT_API_TIMEOUT_SECS";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the intranet API lives and how to talk to it.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Read the config from the process environment. Call `dotenvy::dotenv()`
    /// first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(API_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing(API_URL_VAR))?;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                name: API_URL_VAR,
                value: base_url,
            });
        }

        let token = lookup(API_TOKEN_VAR).filter(|t| !t.is_empty());

        let timeout_secs = match lookup(API_TIMEOUT_VAR) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: API_TIMEOUT_VAR,
                value: raw.clone(),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
