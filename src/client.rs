//! HTTP client for the remote sentiment endpoint
//!
//! One request shape: `POST {"text": "..."}` with the credential in
//! `X-API-KEY`. Every way the call can go wrong is a `ClientError`; callers
//! log the detail and show the user a single fixed message.

use crate::config::Config;
use crate::util::preview;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Header carrying the credential
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Longest error body kept in a `ClientError::Status`
const MAX_ERROR_BODY: usize = 200;

/// Errors from talking to the sentiment service
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("response body is not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("response does not match {{sentiment, confidence}}: {0}")]
    Schema(#[source] serde_json::Error),
}

/// Request body for the predict endpoint
#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    text: &'a str,
}

/// Connection settings for `SentimentClient`
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub health_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Option<Duration>,
}

impl ClientSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            health_url: config.health_url.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Client for the prediction and health endpoints
#[derive(Debug, Clone)]
pub struct SentimentClient {
    http: reqwest::Client,
    endpoint: Url,
    health_url: Url,
    api_key: Option<String>,
}

fn parse_url(url: &str) -> Result<Url, ClientError> {
    Url::parse(url).map_err(|e| ClientError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

impl SentimentClient {
    /// Build a client; fails only on malformed URLs or TLS setup problems
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let endpoint = parse_url(&settings.endpoint)?;

        // Health lives next to predict on the same host unless configured
        let health_url = match &settings.health_url {
            Some(url) => parse_url(url)?,
            None => endpoint
                .join("/health")
                .map_err(|e| ClientError::InvalidUrl {
                    url: settings.endpoint.clone(),
                    reason: e.to_string(),
                })?,
        };

        // No timeout unless configured: the transport default applies
        let mut builder = reqwest::Client::builder().pool_max_idle_per_host(4);
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::Build)?;

        Ok(Self {
            http,
            endpoint,
            health_url,
            api_key: settings.api_key,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn health_url(&self) -> &Url {
        &self.health_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send `text` for classification and return the decoded body as-is
    ///
    /// Empty text is sent like any other.
    pub async fn predict(&self, text: &str) -> Result<Value, ClientError> {
        let mut request = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(&PredictRequest { text });

        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(ClientError::Transport)?;
        Self::decode(response).await
    }

    /// Query the service health endpoint
    pub async fn health(&self) -> Result<Value, ClientError> {
        let response = self
            .http
            .get(self.health_url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(ClientError::Transport)?;

        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> Result<Value, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status,
                body: preview(&body, MAX_ERROR_BODY),
            });
        }

        response.json::<Value>().await.map_err(ClientError::Decode)
    }
}
