//! API access for channel harvesting
//!
//! Every outbound request flows through [`youtube_http::YouTubeHttpClient`],
//! which applies the shared rate limiter and retry policy and folds transport
//! failures into [`ApiError`]. The entity fetchers built on top of it:
//!
//! - [`channel::ChannelResolver`] - handle/URL to channel and uploads playlist
//! - [`videos::VideoEnumerator`] - uploads pagination and batched video lookup
//! - [`comments::CommentAggregator`] - comment threads and replies under a budget

pub mod channel;
pub mod comments;
pub mod pagination;
pub mod retry_formatter;
pub mod transport;
pub mod videos;
pub mod youtube_config;
pub mod youtube_http;

pub use channel::{ChannelResolver, ResolveError};
pub use comments::CommentAggregator;
pub use transport::{HttpResponse, ReqwestTransport, Transport, TransportError};
pub use videos::VideoEnumerator;
pub use youtube_config::Endpoint;
pub use youtube_http::YouTubeHttpClient;

/// API errors
///
/// Only [`ApiError::Transient`] is retried by the gateway; everything else
/// reaches the caller on first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Missing, invalid or restricted API key
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Daily quota used up
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Requested resource does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Comments are turned off for the requested video
    #[error("comments disabled: {0}")]
    CommentsDisabled(String),

    /// Network failure, timeout, throttling or server error
    #[error("transient error: {0}")]
    Transient(String),

    /// Response does not have the expected shape
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// Whether the gateway should retry the call
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Transient(_))
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
