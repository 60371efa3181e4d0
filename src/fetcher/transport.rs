//! HTTP transport used by the API gateway
//!
//! The gateway talks to a [`Transport`] rather than to reqwest directly so the
//! whole pipeline can run against a scripted API in tests.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// HTTP connect timeout
const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw HTTP response: status code and body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

impl HttpResponse {
    /// Build a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures below the HTTP layer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Request did not complete within the configured timeout
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Connection refused, DNS failure and similar
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other transport failure
    #[error("transport error: {0}")]
    Other(String),
}

/// Minimal GET transport
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET request with the given query parameters
    async fn get(&self, url: &str, query: &[(String, String)])
        -> Result<HttpResponse, TransportError>;
}

/// Build the shared reqwest client with connect and request timeouts
pub fn build_http_client(request_timeout: Duration) -> Result<Client, TransportError> {
    Client::builder()
        .connect_timeout(HTTP_CONNECT_TIMEOUT.min(request_timeout))
        .timeout(request_timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| TransportError::Other(format!("failed to build HTTP client: {e}")))
}

/// reqwest-backed transport
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Arc<Client>,
}

impl ReqwestTransport {
    /// Wrap a shared client
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    /// Build a transport with its own client
    pub fn with_timeout(request_timeout: Duration) -> Result<Self, TransportError> {
        Ok(Self::new(Arc::new(build_http_client(request_timeout)?)))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;
        trace!(status, bytes = body.len(), "response received");

        Ok(HttpResponse { status, body })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    // reqwest includes the full URL (and so the API key) in its Display output
    let err = err.without_url();
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else {
        TransportError::Other(err.to_string())
    }
}
