//! HTTP client implementation.

use http::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// HTTP client errors.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Timeout after {0:?}")]
    Timeout(Duration),
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Response error: {0}")]
    Response(String),
    #[error("Client build error: {0}")]
    Build(String),
}

/// Blocking HTTP client used by the shell.
///
/// Every call blocks the caller until the response arrives or the configured
/// timeout elapses.
pub struct HttpClient {
    /// Inner reqwest client.
    inner: reqwest::blocking::Client,
    /// Client configuration.
    config: ClientConfig,
}

/// User agent string sent by the browser shell.
pub fn user_agent() -> String {
    format!("RepoBrowser/{} ({})", env!("CARGO_PKG_VERSION"), std::env::consts::OS)
}

/// Client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Total request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
    /// Accept header.
    pub accept: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            user_agent: user_agent(),
            accept: "application/json".to_string(),
        }
    }
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new() -> Result<Self, ClientError> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| ClientError::InvalidHeader(e.to_string()))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_str(&config.accept)
                .map_err(|e| ClientError::InvalidHeader(e.to_string()))?,
        );

        let inner = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self { inner, config })
    }

    /// GET a URL and decode the JSON body.
    ///
    /// Non-2xx statuses are returned as [`ClientError::Status`] with the body
    /// text attached.
    pub fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, ClientError> {
        tracing::debug!(%url, "GET");

        let response = self
            .inner
            .get(url.clone())
            .send()
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(ClientError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Response(e.to_string()))
    }

    /// Get client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn classify(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.config.timeout)
        } else if err.is_decode() || err.is_body() {
            ClientError::Response(err.to_string())
        } else {
            ClientError::Connection(err.to_string())
        }
    }
}

/// HTTP client builder.
pub struct HttpClientBuilder {
    config: ClientConfig,
}

impl HttpClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Set request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<HttpClient, ClientError> {
        HttpClient::with_config(self.config)
    }
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
