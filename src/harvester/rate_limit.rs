//! Request rate limiting
//!
//! Sliding-window limiter: at most `max_requests` calls start within any
//! `window`. Every API call acquires one slot before it is sent.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::sleep;
use tracing::trace;

/// Rate limiter enforcing "at most N calls per window"
#[derive(Clone)]
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    /// Create a request-based rate limiter
    ///
    /// # Arguments
    /// * `max_requests` - Maximum requests per window (clamped to at least 1)
    /// * `window` - Time window for the limit
    pub fn new(max_requests: usize, window: Duration) -> Self {
        let max_requests = max_requests.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(max_requests)),
            max_requests,
            window,
        }
    }

    /// Maximum requests per window
    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    /// Window length
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Slots currently free
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Wait for a call slot, then return
    ///
    /// Waiters are served in arrival order (tokio's semaphore is fair).
    /// The slot is held for one full window after acquisition, then released.
    pub async fn acquire(&self) -> Result<(), RateLimitError> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| RateLimitError::AcquireError(e.to_string()))?;

        trace!(available = self.semaphore.available_permits(), "rate limit slot acquired");

        let window = self.window;
        tokio::spawn(async move {
            sleep(window).await;
            drop(permit);
        });

        Ok(())
    }
}

/// Rate limiter errors
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    /// Semaphore was closed
    #[error("failed to acquire rate limit slot: {0}")]
    AcquireError(String),
}
