//! Pipeline configuration
//!
//! Settings come from `INLAY_*` environment variables and can be overridden
//! through the `with_*` builder methods (the CLI does this for its flags).
//!
//! - `INLAY_UPLOAD_URL`: upload service endpoint
//! - `INLAY_INSERT_URL`: insertion service endpoint
//! - `INLAY_PROBE_TIMEOUT_MS`: bound on the content type probe (unset: none)
//! - `INLAY_REQUEST_TIMEOUT_MS`: timeout for collaborator requests
//! - `INLAY_MAX_PAYLOAD_BYTES`: largest accepted image
//! - `INLAY_USER_AGENT`: user agent for every outgoing request

use crate::application::DEFAULT_MAX_PAYLOAD_BYTES;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const ENV_UPLOAD_URL: &str = "INLAY_UPLOAD_URL";
pub const ENV_INSERT_URL: &str = "INLAY_INSERT_URL";
pub const ENV_PROBE_TIMEOUT_MS: &str = "INLAY_PROBE_TIMEOUT_MS";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "INLAY_REQUEST_TIMEOUT_MS";
pub const ENV_MAX_PAYLOAD_BYTES: &str = "INLAY_MAX_PAYLOAD_BYTES";
pub const ENV_USER_AGENT: &str = "INLAY_USER_AGENT";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_STORE_POLL_INTERVAL: Duration = Duration::from_millis(500);
const DEFAULT_STORE_POLL_ATTEMPTS: u32 = 20;

/// Errors in configuration values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}={value} is invalid: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("No {0} configured (set {1} or pass it on the command line)")]
    MissingEndpoint(&'static str, &'static str),
}

/// Settings for the pipeline and its HTTP adapters
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub upload_endpoint: Option<Url>,
    pub insert_endpoint: Option<Url>,
    /// `None` keeps the probe unbounded
    pub probe_timeout: Option<Duration>,
    pub request_timeout: Duration,
    pub max_payload_bytes: usize,
    pub user_agent: String,
    /// Delay between durable-storage status polls
    pub store_poll_interval: Duration,
    /// Polls before giving up on durable storage
    pub store_poll_attempts: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            upload_endpoint: None,
            insert_endpoint: None,
            probe_timeout: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            user_agent: format!("inlay/{}", env!("CARGO_PKG_VERSION")),
            store_poll_interval: DEFAULT_STORE_POLL_INTERVAL,
            store_poll_attempts: DEFAULT_STORE_POLL_ATTEMPTS,
        }
    }
}

impl PipelineConfig {
    /// Reads the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get(ENV_UPLOAD_URL) {
            config.upload_endpoint = Some(parse_url(ENV_UPLOAD_URL, &value)?);
        }
        if let Some(value) = get(ENV_INSERT_URL) {
            config.insert_endpoint = Some(parse_url(ENV_INSERT_URL, &value)?);
        }
        if let Some(value) = get(ENV_PROBE_TIMEOUT_MS) {
            config.probe_timeout = Some(Duration::from_millis(parse_number(
                ENV_PROBE_TIMEOUT_MS,
                &value,
            )?));
        }
        if let Some(value) = get(ENV_REQUEST_TIMEOUT_MS) {
            config.request_timeout =
                Duration::from_millis(parse_number(ENV_REQUEST_TIMEOUT_MS, &value)?);
        }
        if let Some(value) = get(ENV_MAX_PAYLOAD_BYTES) {
            config.max_payload_bytes = parse_number(ENV_MAX_PAYLOAD_BYTES, &value)?;
        }
        if let Some(value) = get(ENV_USER_AGENT) {
            config.user_agent = value;
        }

        Ok(config)
    }

    pub fn with_upload_endpoint(mut self, url: Url) -> Self {
        self.upload_endpoint = Some(url);
        self
    }

    pub fn with_insert_endpoint(mut self, url: Url) -> Self {
        self.insert_endpoint = Some(url);
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn with_max_payload_bytes(mut self, max: usize) -> Self {
        self.max_payload_bytes = max;
        self
    }

    /// Returns the upload endpoint or explains how to set it
    pub fn require_upload_endpoint(&self) -> Result<&Url, ConfigError> {
        self.upload_endpoint
            .as_ref()
            .ok_or(ConfigError::MissingEndpoint("upload endpoint", ENV_UPLOAD_URL))
    }

    /// Returns the insertion endpoint or explains how to set it
    pub fn require_insert_endpoint(&self) -> Result<&Url, ConfigError> {
        self.insert_endpoint
            .as_ref()
            .ok_or(ConfigError::MissingEndpoint("insertion endpoint", ENV_INSERT_URL))
    }
}

fn parse_url(key: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|e| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_number<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        })
}
