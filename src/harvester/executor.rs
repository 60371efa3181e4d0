//! Harvest executor
//!
//! Runs resolve -> enumerate -> collect for one channel and returns the
//! collected records as a [`HarvestReport`]. The comment budget is a plain
//! value owned by the run: each [`CommentAggregator::collect`] call receives
//! what is left and reports what it consumed.

use std::sync::Arc;
use tracing::{debug, info};

use crate::fetcher::transport::ReqwestTransport;
use crate::fetcher::{ChannelResolver, CommentAggregator, VideoEnumerator, YouTubeHttpClient};
use crate::harvester::config::HarvestConfig;
use crate::harvester::rate_limit::RateLimiter;
use crate::harvester::HarvestError;
use crate::output::{ExportSink, OutputResult};
use crate::{Channel, Comment, Video};

/// Records collected by one run
#[derive(Debug, Clone)]
pub struct HarvestReport {
    /// Resolved channel
    pub channel: Channel,
    /// All valid videos, in uploads order
    pub videos: Vec<Video>,
    /// Collected comments, grouped by video in video order
    pub comments: Vec<Comment>,
    /// Whether the comment budget ran out before every video was visited
    pub budget_exhausted: bool,
}

impl HarvestReport {
    /// Hand both datasets to an export sink
    pub fn export<S: ExportSink + ?Sized>(&self, sink: &mut S) -> OutputResult<()> {
        sink.export(&self.videos, &self.comments)
    }

    /// Number of collected replies
    pub fn reply_count(&self) -> usize {
        self.comments.iter().filter(|c| c.is_reply()).count()
    }
}

/// Pipeline driver for one channel
pub struct HarvestExecutor {
    client: YouTubeHttpClient,
    max_comments: usize,
}

impl HarvestExecutor {
    /// Create an executor on top of an existing gateway
    pub fn new(client: YouTubeHttpClient, max_comments: usize) -> Self {
        Self {
            client,
            max_comments,
        }
    }

    /// Build the gateway (reqwest transport, rate limiter) from a configuration
    ///
    /// # Errors
    /// Returns `Configuration` for an empty API key or a zero rate limit, and
    /// `Transport` if the HTTP client cannot be built.
    pub fn from_config(config: &HarvestConfig) -> Result<Self, HarvestError> {
        if config.api_key.trim().is_empty() {
            return Err(HarvestError::Configuration("API key is empty".to_string()));
        }
        if config.requests_per_window == 0 {
            return Err(HarvestError::Configuration(
                "rate limit must allow at least one request per window".to_string(),
            ));
        }

        let transport = ReqwestTransport::with_timeout(config.request_timeout)?;
        let rate_limiter = Arc::new(RateLimiter::new(
            config.requests_per_window,
            config.rate_limit_window,
        ));
        let client = YouTubeHttpClient::new(
            Arc::new(transport),
            config.api_base_url.clone(),
            config.api_key.clone(),
            rate_limiter,
            config.max_retries,
        );

        Ok(Self::new(client, config.max_comments))
    }

    /// Configured comment budget
    pub fn max_comments(&self) -> usize {
        self.max_comments
    }

    /// Run the pipeline for `channel_input` (handle or URL)
    ///
    /// Video metadata is always collected for every video. Comments are
    /// collected video by video until the budget reaches zero; no comment
    /// call is made after that.
    ///
    /// # Errors
    /// Any error is fatal and the partial results are dropped.
    pub async fn run(&self, channel_input: &str) -> Result<HarvestReport, HarvestError> {
        let channel = ChannelResolver::new(self.client.clone())
            .resolve(channel_input)
            .await?;

        let videos = VideoEnumerator::new(self.client.clone())
            .enumerate(&channel)
            .await?;

        let aggregator = CommentAggregator::new(self.client.clone());
        let mut budget = self.max_comments;
        let mut comments = Vec::new();
        let mut visited = 0;

        for video in &videos {
            if budget == 0 {
                break;
            }
            let (batch, consumed) = aggregator.collect(&video.video_id, budget).await?;
            debug!(
                "Video {}: {} comment(s), {} left in budget",
                video.video_id,
                consumed,
                budget.saturating_sub(consumed)
            );
            budget = budget.saturating_sub(consumed);
            comments.extend(batch);
            visited += 1;
        }

        let budget_exhausted = budget == 0 && visited < videos.len();
        if budget_exhausted {
            info!(
                "Comment budget of {} reached after {} of {} videos",
                self.max_comments,
                visited,
                videos.len()
            );
        }

        let report = HarvestReport {
            channel,
            videos,
            comments,
            budget_exhausted,
        };
        info!(
            "Harvested {} videos and {} comments ({} replies)",
            report.videos.len(),
            report.comments.len(),
            report.reply_count()
        );
        Ok(report)
    }
}
