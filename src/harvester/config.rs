//! Harvest configuration and defaults

use std::path::PathBuf;
use std::time::Duration;

/// Default base URL of the YouTube Data API v3
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Environment variable consulted for the API key when `--api-key` is absent
pub const API_KEY_ENV_VAR: &str = "YOUTUBE_API_KEY";

/// Default output path handed to the export sink
pub const DEFAULT_OUTPUT_PATH: &str = "youtube_data.xlsx";

/// Default run-wide comment budget (top-level comments and replies combined)
pub const DEFAULT_MAX_COMMENTS: usize = 100;

/// Maximum retries for a transient failure.
/// 3 retries with backoff of 0.5s, 1s and 2s rides out short outages
/// without stalling a run that is going to fail anyway.
pub const MAX_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds
pub const INITIAL_BACKOFF_MS: u64 = 500;

/// Maximum backoff delay in milliseconds
pub const MAX_BACKOFF_MS: u64 = 8_000;

/// Calls allowed per rate limit window
pub const DEFAULT_REQUESTS_PER_WINDOW: usize = 60;

/// Rate limit window
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

/// Per-request timeout; expiry surfaces as a transient failure
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Calculate exponential backoff delay for the given retry (0-indexed)
pub fn calculate_backoff(retry_count: u32) -> Duration {
    let delay_ms = INITIAL_BACKOFF_MS.saturating_mul(2u64.saturating_pow(retry_count));
    Duration::from_millis(delay_ms.min(MAX_BACKOFF_MS))
}

/// Settings for one harvest run
///
/// Built from the CLI, or directly by library users. All fields have
/// defaults except the API key.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// API key sent with every request
    pub api_key: String,
    /// API base URL
    pub api_base_url: String,
    /// Run-wide comment budget
    pub max_comments: usize,
    /// Output path for the export sink
    pub output: PathBuf,
    /// Retries for transient failures
    pub max_retries: u32,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Calls allowed per window
    pub requests_per_window: usize,
    /// Rate limit window length
    pub rate_limit_window: Duration,
}

impl HarvestConfig {
    /// Create a configuration with default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            max_comments: DEFAULT_MAX_COMMENTS,
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            max_retries: MAX_RETRIES,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            requests_per_window: DEFAULT_REQUESTS_PER_WINDOW,
            rate_limit_window: RATE_LIMIT_WINDOW,
        }
    }

    /// Set the comment budget
    pub fn with_max_comments(mut self, max_comments: usize) -> Self {
        self.max_comments = max_comments;
        self
    }

    /// Set the output path
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Set the API base URL
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the transient retry limit
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the rate limit policy
    pub fn with_rate_limit(mut self, requests: usize, window: Duration) -> Self {
        self.requests_per_window = requests;
        self.rate_limit_window = window;
        self
    }
}

/// Pick the API key: the explicit flag wins over the environment
///
/// Blank values count as absent.
pub fn resolve_api_key(flag: Option<String>, env: Option<String>) -> Option<String> {
    flag.into_iter()
        .chain(env)
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}
