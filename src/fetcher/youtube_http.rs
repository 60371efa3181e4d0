//! YouTube API gateway
//!
//! Single entry point for all outbound calls:
//! - Rate limiter slot per attempt
//! - Status/body classification into [`ApiError`]
//! - Retry of transient failures with exponential backoff
//! - Typed deserialization of the response body

use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::fetcher::retry_formatter::{classify_status, classify_transport, RetryContext};
use crate::fetcher::transport::Transport;
use crate::fetcher::youtube_config::Endpoint;
use crate::fetcher::{ApiError, ApiResult};
use crate::harvester::config::calculate_backoff;
use crate::harvester::rate_limit::RateLimiter;

/// States of one gateway call
///
/// `Idle -> Attempting -> {Success, RetryWait -> Attempting, Failed}`
enum CallState<T> {
    Idle,
    Attempting { attempt: u32 },
    RetryWait { attempt: u32, error: ApiError },
    Success(T),
    Failed(ApiError),
}

/// API gateway shared by all fetchers
///
/// Cloning is cheap: the transport and rate limiter are shared.
#[derive(Clone)]
pub struct YouTubeHttpClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    api_key: String,
    rate_limiter: Arc<RateLimiter>,
    max_retries: u32,
}

impl YouTubeHttpClient {
    /// Create a gateway
    ///
    /// # Arguments
    /// * `transport` - HTTP transport
    /// * `base_url` - API base URL (e.g. `https://www.googleapis.com/youtube/v3`)
    /// * `api_key` - API key appended to every request
    /// * `rate_limiter` - Shared rate limiter
    /// * `max_retries` - Retries for transient failures
    pub fn new(
        transport: Arc<dyn Transport>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        rate_limiter: Arc<RateLimiter>,
        max_retries: u32,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            rate_limiter,
            max_retries,
        }
    }

    /// Configured retry limit
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call an endpoint and deserialize the response
    ///
    /// `params` must not include `part` or `key`; both are added here.
    ///
    /// # Errors
    /// Transient failures are returned only after retries are exhausted.
    /// All other [`ApiError`] kinds are returned on first occurrence.
    pub async fn call<T>(&self, endpoint: Endpoint, params: &[(&str, String)]) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint.path());
        let query = self.build_query(endpoint, params);
        let max_attempts = self.max_retries + 1;

        let mut state = CallState::Idle;
        loop {
            state = match state {
                CallState::Idle => CallState::Attempting { attempt: 0 },

                CallState::Attempting { attempt } => {
                    self.rate_limiter
                        .acquire()
                        .await
                        .map_err(|e| ApiError::Transient(e.to_string()))?;

                    debug!(%endpoint, ?params, attempt = attempt + 1, "calling API");

                    match self.attempt::<T>(&url, &query).await {
                        Ok(value) => CallState::Success(value),
                        Err(error) if error.is_retryable() && attempt < self.max_retries => {
                            CallState::RetryWait { attempt, error }
                        }
                        Err(error) => {
                            if error.is_retryable() {
                                let ctx = RetryContext::new(
                                    attempt + 1,
                                    max_attempts,
                                    Default::default(),
                                    endpoint.to_string(),
                                    error.clone(),
                                );
                                warn!("{}", ctx.format_failure());
                            }
                            CallState::Failed(error)
                        }
                    }
                }

                CallState::RetryWait { attempt, error } => {
                    let backoff = calculate_backoff(attempt);
                    let ctx =
                        RetryContext::new(attempt + 1, max_attempts, backoff, endpoint.to_string(), error);
                    warn!("{}", ctx.format_retry());
                    tokio::time::sleep(backoff).await;
                    CallState::Attempting {
                        attempt: attempt + 1,
                    }
                }

                CallState::Success(value) => return Ok(value),
                CallState::Failed(error) => return Err(error),
            };
        }
    }

    /// One HTTP round trip, classified
    async fn attempt<T>(&self, url: &str, query: &[(String, String)]) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .transport
            .get(url, query)
            .await
            .map_err(|e| classify_transport(&e))?;

        if !response.is_success() {
            return Err(classify_status(response.status, &response.body));
        }

        serde_json::from_str::<T>(&response.body)
            .map_err(|e| ApiError::Malformed(format!("failed to deserialize response: {e}")))
    }

    fn build_query(&self, endpoint: Endpoint, params: &[(&str, String)]) -> Vec<(String, String)> {
        let mut query = Vec::with_capacity(params.len() + 2);
        query.push(("part".to_string(), endpoint.part().to_string()));
        query.extend(params.iter().map(|(k, v)| (k.to_string(), v.clone())));
        query.push(("key".to_string(), self.api_key.clone()));
        query
    }
}
