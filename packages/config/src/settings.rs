// ABOUTME: Runtime configuration loaded from environment variables
// ABOUTME: Data directory, Messages API credentials, timeouts and login delay

use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::constants::{
    ANTHROPIC_API_KEY, ANTHROPIC_MODEL, HOME, TAXIFY_AI_API_URL, TAXIFY_DATA_DIR,
    TAXIFY_HTTP_CONNECT_TIMEOUT_SECS, TAXIFY_HTTP_REQUEST_TIMEOUT_SECS, TAXIFY_LOGIN_DELAY_MS,
    USERPROFILE,
};

pub const DEFAULT_AI_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOGIN_DELAY_MS: u64 = 1500;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {source}")]
    InvalidNumber {
        key: &'static str,
        #[source]
        source: ParseIntError,
    },
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
    #[error("Unable to determine a data directory; set TAXIFY_DATA_DIR")]
    NoDataDir,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub login_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match non_empty(lookup(TAXIFY_DATA_DIR)) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir(&lookup)?,
        };

        let api_key = non_empty(lookup(ANTHROPIC_API_KEY));
        let model = non_empty(lookup(ANTHROPIC_MODEL)).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_url =
            non_empty(lookup(TAXIFY_AI_API_URL)).unwrap_or_else(|| DEFAULT_AI_API_URL.to_string());

        let request_timeout = Duration::from_secs(parse_u64(
            &lookup,
            TAXIFY_HTTP_REQUEST_TIMEOUT_SECS,
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);
        let connect_timeout = Duration::from_secs(parse_u64(
            &lookup,
            TAXIFY_HTTP_CONNECT_TIMEOUT_SECS,
            DEFAULT_CONNECT_TIMEOUT_SECS,
        )?);
        if request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout(TAXIFY_HTTP_REQUEST_TIMEOUT_SECS));
        }
        if connect_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout(TAXIFY_HTTP_CONNECT_TIMEOUT_SECS));
        }

        // Zero is allowed here: it disables the simulated login delay
        let login_delay = Duration::from_millis(parse_u64(
            &lookup,
            TAXIFY_LOGIN_DELAY_MS,
            DEFAULT_LOGIN_DELAY_MS,
        )?);

        debug!("Resolved data directory: {:?}", data_dir);

        Ok(Config {
            data_dir,
            api_key,
            model,
            api_url,
            request_timeout,
            connect_timeout,
            login_delay,
        })
    }

    /// Replace the data directory, e.g. from a `--data-dir` flag
    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = data_dir;
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_u64<F>(lookup: &F, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match non_empty(lookup(key)) {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|source| ConfigError::InvalidNumber { key, source }),
        None => Ok(default),
    }
}

/// `~/.taxify`, preferring HOME (or USERPROFILE) so tests can redirect it
fn default_data_dir<F>(lookup: &F) -> Result<PathBuf, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(home) = non_empty(lookup(HOME)).or_else(|| non_empty(lookup(USERPROFILE))) {
        return Ok(PathBuf::from(home).join(".taxify"));
    }
    dirs::home_dir()
        .map(|home| home.join(".taxify"))
        .ok_or(ConfigError::NoDataDir)
}
