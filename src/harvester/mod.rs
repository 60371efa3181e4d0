//! Harvest orchestration and rate limiting
//!
//! The harvester drives one run end to end:
//!
//! 1. **Resolve** the channel via [`crate::fetcher::ChannelResolver`]
//! 2. **Enumerate** every video via [`crate::fetcher::VideoEnumerator`]
//! 3. **Collect** comments video by video via [`crate::fetcher::CommentAggregator`]
//!    until the comment budget is used up
//! 4. **Export** the two datasets through an [`crate::output::ExportSink`]
//!
//! # Components
//!
//! - [`executor`] - The pipeline driver and its report
//! - [`rate_limit`] - Sliding-window rate limiter
//! - [`config`] - Run configuration, defaults and backoff calculation
//!
//! # Error Handling
//!
//! Any [`HarvestError`] is fatal for the run and nothing is exported.
//! Per-record problems (invalid records, deleted videos, disabled comments)
//! are logged and skipped inside the fetchers and never reach this level.

pub mod config;
pub mod executor;
pub mod rate_limit;

pub use config::HarvestConfig;
pub use executor::{HarvestExecutor, HarvestReport};
pub use rate_limit::{RateLimitError, RateLimiter};

use crate::fetcher::{ApiError, ResolveError, TransportError};
use crate::output::OutputError;

/// Fatal harvest errors
#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    /// Channel could not be resolved
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// API call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// HTTP client could not be built
    #[error("transport setup failed: {0}")]
    Transport(#[from] TransportError),

    /// Export failed
    #[error("output error: {0}")]
    Output(#[from] OutputError),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Configuration(String),
}
