//! `SirenApi`: reqwest implementation of [`RemoteClient`].

use crate::client::RemoteClient;
use crate::siren::routes::{self, Route};
use crate::types::{ApiConfig, Error, Result};
use crate::validation::validate_non_empty;
use async_trait::async_trait;
use reqwest::Url;
use serde_json::{json, Value};
use std::fmt;
use tracing::Instrument;

/// Sent on every request so Siren can attribute toolkit traffic.
pub const USER_AGENT: &str = concat!("siren-agent-toolkit-rust/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Siren REST API.
#[derive(Clone)]
pub struct SirenApi {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl fmt::Debug for SirenApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SirenApi")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl SirenApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        validate_non_empty(&config.api_key, "api_key")?;
        let base = config.resolved_base_url();
        let base_url = Url::parse(&base)
            .map_err(|e| Error::config(format!("base_url '{}' is not a valid URL: {}", base, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!("base_url '{}' cannot be a base", base)));
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, route: &Route) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::config("base_url cannot be a base"))?
            .pop_if_empty()
            .extend(&route.segments);
        Ok(url)
    }

    async fn send(&self, route: Route) -> Result<Value> {
        let url = self.url_for(&route)?;
        let mut request = self
            .http
            .request(route.verb.clone(), url)
            .bearer_auth(&self.api_key);
        if !route.query.is_empty() {
            request = request.query(&route.query);
        }
        if let Some(body) = &route.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(status = status.as_u16(), bytes = text.len(), "siren response");

        let body = parse_body(&text);
        if !status.is_success() {
            return Err(Error::remote_call(format!(
                "{} {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("error"),
                error_message(&body, &text)
            )));
        }
        unwrap_envelope(body, status.as_u16())
    }
}

#[async_trait]
impl RemoteClient for SirenApi {
    async fn run(&self, method: &str, args: Value) -> Result<Value> {
        let route = routes::route(method, &args)?;
        let span = tracing::info_span!(
            "siren_request",
            method,
            verb = %route.verb,
            path = %route.path(),
        );
        self.send(route).instrument(span).await
    }
}

// =============================================================================
// Response handling
// =============================================================================

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Best-effort message from an error body: `error.message`, `message`, or raw text.
fn error_message(body: &Value, raw: &str) -> String {
    body.pointer("/error/message")
        .or_else(|| body.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| raw.trim().to_string())
}

/// Siren wraps payloads as `{"data": ..., "error": ...}`.
fn unwrap_envelope(body: Value, status: u16) -> Result<Value> {
    match body {
        Value::Null => Ok(json!({ "success": true, "status": status })),
        Value::Object(mut map) if map.contains_key("data") || map.contains_key("error") => {
            if let Some(error) = map.get("error").filter(|e| !e.is_null()) {
                return Err(Error::remote_call(format!(
                    "{}: {}",
                    status,
                    error_message(&json!({ "error": error }), &error.to_string())
                )));
            }
            match map.remove("data") {
                Some(Value::Null) | None => Ok(json!({ "success": true, "status": status })),
                Some(data) => Ok(data),
            }
        }
        other => Ok(other),
    }
}
