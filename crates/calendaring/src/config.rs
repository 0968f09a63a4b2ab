use std::{env, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;

use crate::google::GoogleCredentials;

const DEFAULT_CALENDAR_API_URL: &str = "https://www.googleapis.com/calendar/v3";
const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Longest accepted cache TTL (one year); larger values are clamped.
const MAX_CACHE_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

/// Errors raised while loading configuration at start-up.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing Google credential: {0}")]
    MissingCredential(&'static str),

    #[error("CACHE_TTL_SECONDS must be greater than zero")]
    ZeroCacheTtl,
}

/// Application configuration loaded from environment variables and an
/// optional JSON file.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache TTL in seconds (default: 86,400)
    pub cache_ttl_seconds: u64,
    /// Maximum number of cache entries (default: 10,000)
    /// Note: Only used when the `memory` feature is enabled.
    #[allow(dead_code)]
    pub cache_max_entries: usize,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[allow(dead_code)]
    pub redis_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
    /// Base URL of the Calendar v3 API
    pub calendar_api_url: String,
    /// OAuth2 token endpoint
    pub token_url: String,
    /// Timeout for each upstream request in seconds (default: 10)
    pub upstream_timeout_seconds: u64,
}

/// Shape of the JSON config file. Every key is optional and overrides the
/// environment.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(rename = "CACHE_TTL_SECONDS")]
    cache_ttl_seconds: Option<u64>,
    #[serde(rename = "CACHE_MAX_ENTRIES")]
    cache_max_entries: Option<usize>,
    #[serde(rename = "REDIS_URL")]
    redis_url: Option<String>,
    #[serde(rename = "CLIENT_ID")]
    client_id: Option<String>,
    #[serde(rename = "CLIENT_SECRET")]
    client_secret: Option<String>,
    // Older config files carry the misspelled key.
    #[serde(rename = "REFRESH_TOKEN", alias = "REFESH_TOKEN")]
    refresh_token: Option<String>,
    #[serde(rename = "CALENDAR_API_URL")]
    calendar_api_url: Option<String>,
    #[serde(rename = "TOKEN_URL")]
    token_url: Option<String>,
    #[serde(rename = "UPSTREAM_TIMEOUT_SECONDS")]
    upstream_timeout_seconds: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 86,400)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET`, `GOOGLE_REFRESH_TOKEN` - OAuth2 credentials
    /// - `GOOGLE_CALENDAR_API_URL` - Calendar API base URL
    /// - `GOOGLE_TOKEN_URL` - OAuth2 token endpoint
    /// - `UPSTREAM_TIMEOUT_SECONDS` - Upstream request timeout (default: 10)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Environment variables first, then the JSON file at `path` on top.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::from_env();

        if let Some(path) = path {
            let display = path.display().to_string();
            let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: display.clone(),
                source,
            })?;
            let file: FileConfig =
                serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                    path: display,
                    source,
                })?;
            config.apply_file(file);
        }

        config.validate()
    }

    /// Rejects a zero cache TTL and clamps one that is too long.
    fn validate(mut self) -> Result<Self, ConfigError> {
        if self.cache_ttl_seconds == 0 {
            return Err(ConfigError::ZeroCacheTtl);
        }

        if self.cache_ttl_seconds > MAX_CACHE_TTL_SECONDS {
            tracing::warn!(
                requested = self.cache_ttl_seconds,
                max = MAX_CACHE_TTL_SECONDS,
                "CACHE_TTL_SECONDS too large, clamping"
            );
            self.cache_ttl_seconds = MAX_CACHE_TTL_SECONDS;
        }

        Ok(self)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str| lookup(key).and_then(|v| v.parse().ok());

        Self {
            cache_ttl_seconds: parsed("CACHE_TTL_SECONDS").unwrap_or(86_400),
            cache_max_entries: lookup("CACHE_MAX_ENTRIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://localhost:6379".to_string()),
            client_id: lookup("GOOGLE_CLIENT_ID"),
            client_secret: lookup("GOOGLE_CLIENT_SECRET"),
            refresh_token: lookup("GOOGLE_REFRESH_TOKEN"),
            calendar_api_url: lookup("GOOGLE_CALENDAR_API_URL")
                .unwrap_or_else(|| DEFAULT_CALENDAR_API_URL.to_string()),
            token_url: lookup("GOOGLE_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            upstream_timeout_seconds: parsed("UPSTREAM_TIMEOUT_SECONDS").unwrap_or(10),
        }
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(v) = file.cache_ttl_seconds {
            self.cache_ttl_seconds = v;
        }
        if let Some(v) = file.cache_max_entries {
            self.cache_max_entries = v;
        }
        if let Some(v) = file.redis_url {
            self.redis_url = v;
        }
        if file.client_id.is_some() {
            self.client_id = file.client_id;
        }
        if file.client_secret.is_some() {
            self.client_secret = file.client_secret;
        }
        if file.refresh_token.is_some() {
            self.refresh_token = file.refresh_token;
        }
        if let Some(v) = file.calendar_api_url {
            self.calendar_api_url = v;
        }
        if let Some(v) = file.token_url {
            self.token_url = v;
        }
        if let Some(v) = file.upstream_timeout_seconds {
            self.upstream_timeout_seconds = v;
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Get upstream request timeout as a Duration.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }

    /// OAuth2 credentials for the upstream calendar API.
    pub fn google_credentials(&self) -> Result<GoogleCredentials, ConfigError> {
        fn required(value: &Option<String>, name: &'static str) -> Result<String, ConfigError> {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
                .ok_or(ConfigError::MissingCredential(name))
        }

        Ok(GoogleCredentials {
            client_id: required(&self.client_id, "client id")?,
            client_secret: required(&self.client_secret, "client secret")?,
            refresh_token: required(&self.refresh_token, "refresh token")?,
        })
    }
}

impl Default for Config {
    /// Built-in defaults, ignoring the environment.
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
