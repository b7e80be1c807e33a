//! Configuration structures.
//!
//! Configuration is loaded from a JSON file or string, then overlaid with
//! environment variables.

use crate::tools::Permissions;
use crate::types::{Error, Result};
use crate::validation::{validate_http_url, validate_non_empty};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Production Siren API endpoint.
pub const PROD_BASE_URL: &str = "https://api.trysiren.io";
/// Development Siren API endpoint.
pub const DEV_BASE_URL: &str = "https://api.dev.trysiren.io";

/// Global toolkit configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Siren API connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Which tool categories and actions to expose.
    #[serde(default)]
    pub permissions: Permissions,
}

impl Config {
    /// Parse a JSON configuration document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Overlay `SIREN_*` variables from the process environment.
    pub fn with_env(self) -> Result<Self> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay `SIREN_*` variables resolved through `lookup`.
    ///
    /// Recognised keys: `SIREN_API_KEY`, `SIREN_ENV` (`prod`/`dev`),
    /// `SIREN_BASE_URL`, `SIREN_TIMEOUT` (humantime, e.g. `30s`).
    pub fn with_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("SIREN_API_KEY") {
            self.api.api_key = key;
        }
        if let Some(env) = lookup("SIREN_ENV") {
            self.api.env = env.parse()?;
        }
        if let Some(url) = lookup("SIREN_BASE_URL") {
            self.api.base_url = Some(url);
        }
        if let Some(timeout) = lookup("SIREN_TIMEOUT") {
            self.api.timeout = humantime_serde::deserialize(serde_json::Value::String(timeout))
                .map_err(|e| Error::config(format!("SIREN_TIMEOUT: {}", e)))?;
        }
        Ok(self)
    }

    /// Reject configurations that cannot reach the API.
    pub fn validate(&self) -> Result<()> {
        validate_non_empty(&self.api.api_key, "api_key")?;
        validate_http_url(&self.api.resolved_base_url(), "base_url")?;
        if self.api.timeout.is_zero() {
            return Err(Error::config("timeout must be positive"));
        }
        Ok(())
    }
}

/// Siren deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiEnv {
    #[default]
    Prod,
    Dev,
}

impl ApiEnv {
    pub fn base_url(self) -> &'static str {
        match self {
            ApiEnv::Prod => PROD_BASE_URL,
            ApiEnv::Dev => DEV_BASE_URL,
        }
    }
}

impl std::str::FromStr for ApiEnv {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Ok(ApiEnv::Prod),
            "dev" | "development" => Ok(ApiEnv::Dev),
            other => Err(Error::config(format!(
                "unknown environment '{}', expected prod or dev",
                other
            ))),
        }
    }
}

/// Siren API connection settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Bearer token for the Siren API.
    #[serde(default)]
    pub api_key: String,

    /// Target deployment.
    #[serde(default)]
    pub env: ApiEnv,

    /// Explicit endpoint; overrides `env` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Per-request timeout handed to the HTTP client.
    #[serde(with = "humantime_serde", default = "default_timeout")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Endpoint actually used: the override if present, else the env default.
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| self.env.base_url().to_string())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            env: ApiEnv::Prod,
            base_url: None,
            timeout: default_timeout(),
        }
    }
}

// The key never reaches logs.
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = if self.api_key.is_empty() { "" } else { "***" };
        f.debug_struct("ApiConfig")
            .field("api_key", &redacted)
            .field("env", &self.env)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
