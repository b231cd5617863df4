// src/config.rs

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3001/api";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_MAX_WORKERS: usize = 8;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has an invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Where the console reads and writes proposals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendMode {
    #[default]
    Fixtures,
    Remote,
}

/// Console configuration, read from the environment.
///
/// | Env Var                        | Default                     |
/// |--------------------------------|-----------------------------|
/// | `PROPOSALS_API_BASE_URL`       | `http://localhost:3001/api` |
/// | `PROPOSALS_API_TOKEN`          | unset                       |
/// | `PROPOSALS_BACKEND`            | `fixtures`                  |
/// | `PROPOSALS_BIND_ADDR`          | `127.0.0.1:3000`            |
/// | `PROPOSALS_MAX_WORKERS`        | `8`                         |
/// | `PROPOSALS_HTTP_TIMEOUT_SECS`  | `30`                        |
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: Url,
    pub api_token: Option<String>,
    pub backend: BackendMode,
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub http_timeout: Duration,
}

impl Settings {
    /// Load from the process environment after an optional `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing `.env` is fine.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let raw_url = get("PROPOSALS_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.into());
        let api_base_url = Url::parse(&raw_url)
            .ok()
            .filter(|u| matches!(u.scheme(), "http" | "https"))
            .ok_or_else(|| invalid("PROPOSALS_API_BASE_URL", &raw_url, "expected an http(s) URL"))?;

        let backend = match get("PROPOSALS_BACKEND").as_deref() {
            None => BackendMode::default(),
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "fixtures" => BackendMode::Fixtures,
                "remote" => BackendMode::Remote,
                _ => return Err(invalid("PROPOSALS_BACKEND", raw, "expected fixtures or remote")),
            },
        };

        let raw_addr = get("PROPOSALS_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| invalid("PROPOSALS_BIND_ADDR", &raw_addr, "expected host:port"))?;

        let max_workers = match get("PROPOSALS_MAX_WORKERS") {
            None => DEFAULT_MAX_WORKERS,
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| invalid("PROPOSALS_MAX_WORKERS", &raw, "expected a positive integer"))?,
        };

        let timeout_secs = match get("PROPOSALS_HTTP_TIMEOUT_SECS") {
            None => DEFAULT_HTTP_TIMEOUT_SECS,
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    invalid("PROPOSALS_HTTP_TIMEOUT_SECS", &raw, "expected a positive number of seconds")
                })?,
        };

        Ok(Self {
            api_base_url,
            api_token: get("PROPOSALS_API_TOKEN"),
            backend,
            bind_addr,
            max_workers,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn invalid(var: &'static str, value: &str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason,
    }
}
