//! Error classification and retry log messages for the API gateway
//!
//! YouTube reports most failures as 400/403 with a machine-readable `reason`
//! inside the error body, so the status code alone is not enough to tell a
//! bad key from an exhausted quota or disabled comments.

use serde::Deserialize;
use std::time::Duration;

use super::transport::TransportError;
use super::ApiError;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
    // Newer responses carry the reason under `details[].reason` only
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    reason: Option<String>,
}

/// Reason and message extracted from an API error body
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorReason {
    /// First `reason` found, e.g. `quotaExceeded`
    pub reason: Option<String>,
    /// Human readable message
    pub message: Option<String>,
}

impl ErrorReason {
    /// Parse an error body; unparseable bodies yield an empty reason
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => {
                let reason = envelope
                    .error
                    .errors
                    .iter()
                    .chain(envelope.error.details.iter())
                    .find_map(|d| d.reason.clone());
                Self {
                    reason,
                    message: envelope.error.message,
                }
            }
            Err(_) => Self::default(),
        }
    }

    fn describe(&self, status: u16) -> String {
        match (&self.reason, &self.message) {
            (Some(reason), Some(message)) => format!("HTTP {status} {reason}: {message}"),
            (Some(reason), None) => format!("HTTP {status} {reason}"),
            (None, Some(message)) => format!("HTTP {status}: {message}"),
            (None, None) => format!("HTTP {status}"),
        }
    }
}

/// Map a non-2xx response onto the API error taxonomy
pub fn classify_status(status: u16, body: &str) -> ApiError {
    let reason = ErrorReason::from_body(body);
    let detail = reason.describe(status);

    match (status, reason.reason.as_deref()) {
        (_, Some("quotaExceeded" | "dailyLimitExceeded")) => ApiError::QuotaExceeded(detail),
        (_, Some("rateLimitExceeded" | "userRateLimitExceeded")) => ApiError::Transient(detail),
        (_, Some("commentsDisabled")) => ApiError::CommentsDisabled(detail),
        (_, Some("keyInvalid" | "keyExpired" | "accessNotConfigured" | "ipRefererBlocked"))
        | (401, _) => ApiError::Unauthorized(detail),
        (403, None) => ApiError::Unauthorized(detail),
        // Any other 403 reason, `forbidden` included, names one inaccessible
        // resource (private playlist, restricted video), not a bad key
        (403, Some(_)) => ApiError::NotFound(detail),
        (404, _) => ApiError::NotFound(detail),
        (408 | 429, _) => ApiError::Transient(detail),
        (500..=599, _) => ApiError::Transient(detail),
        _ => ApiError::Malformed(format!("unexpected response: {detail}")),
    }
}

/// Map a transport failure onto the API error taxonomy
///
/// Everything below HTTP is transient: timeouts, refused connections, resets.
pub fn classify_transport(err: &TransportError) -> ApiError {
    ApiError::Transient(err.to_string())
}

/// Context for formatting retry messages
#[derive(Debug, Clone)]
pub struct RetryContext {
    /// Attempt that just failed (1-based)
    pub attempt: u32,
    /// Total attempts allowed (initial + retries)
    pub max_attempts: u32,
    /// Backoff before the next attempt
    pub backoff_duration: Duration,
    /// Endpoint being called
    pub endpoint: String,
    /// Error that triggered the retry
    pub error: ApiError,
}

impl RetryContext {
    /// Build a retry context
    pub fn new(
        attempt: u32,
        max_attempts: u32,
        backoff_duration: Duration,
        endpoint: impl Into<String>,
        error: ApiError,
    ) -> Self {
        Self {
            attempt,
            max_attempts,
            backoff_duration,
            endpoint: endpoint.into(),
            error,
        }
    }

    /// Message logged before sleeping
    pub fn format_retry(&self) -> String {
        format!(
            "{} failed (attempt {}/{}): {} - retrying in {:.1}s",
            self.endpoint,
            self.attempt,
            self.max_attempts,
            self.error,
            self.backoff_duration.as_secs_f64()
        )
    }

    /// Message logged when retries are exhausted
    pub fn format_failure(&self) -> String {
        format!(
            "{} failed after {} attempts: {}",
            self.endpoint, self.max_attempts, self.error
        )
    }
}
