//! # Channel Harvester Library
//!
//! Collects the public metadata of every video on a YouTube channel plus a
//! bounded set of comments (and their replies) through the YouTube Data API v3,
//! then hands both datasets to an export sink as two tables.
//!
//! ## Features
//!
//! - **Handle Resolution**: `@Handle`, profile URLs and legacy `/c/` or `/user/` forms
//! - **Cursor Pagination**: uploads, comment threads and reply listings are walked to the end
//! - **Comment Budget**: one run-wide budget caps top-level comments and replies combined
//! - **Rate Limiting**: every outbound call goes through a sliding-window limiter
//! - **Retry**: transient failures are retried with exponential backoff
//! - **Type-Safe**: raw payloads are validated into [`Video`] and [`Comment`] records
//!
//! ## Quick Start
//!
//! ```no_run
//! use channel_harvester::harvester::{HarvestConfig, HarvestExecutor};
//! use channel_harvester::output::XlsxWorkbookSink;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HarvestConfig::new("my-api-key").with_max_comments(250);
//! let executor = HarvestExecutor::from_config(&config)?;
//!
//! let report = executor.run("@GoogleDevelopers").await?;
//! let mut sink = XlsxWorkbookSink::new("youtube_data.xlsx");
//! report.export(&mut sink)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`identifier`] - Channel handle / URL parsing
//! - [`fetcher`] - API gateway, pagination, channel resolver, video enumerator, comment aggregator
//! - [`validator`] - Raw payload validation into typed records
//! - [`harvester`] - Run configuration, rate limiting and the pipeline driver
//! - [`output`] - Export sinks (Excel workbook, CSV sheets)
//! - [`cli`] - Command line surface

#![warn(missing_docs)]
#![warn(clippy::all)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// CLI command implementation
pub mod cli;

/// API access: gateway, pagination and the per-entity fetchers
pub mod fetcher;

/// Run orchestration, configuration and rate limiting
pub mod harvester;

/// Channel handle and URL parsing
pub mod identifier;

/// Export sinks
pub mod output;

/// Raw payload validation
pub mod validator;

pub use identifier::ChannelIdentifier;

/// A resolved channel
///
/// Produced once per run by the channel resolver and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// Platform channel id (e.g. `UC_x5XG1OV2P6uZZ5FSM9Ttw`)
    pub id: String,
    /// Id of the channel's uploads playlist
    pub uploads_playlist_id: String,
}

/// Validated video metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    /// 11-character video id, unique within a run
    pub video_id: String,
    /// Video title
    pub title: String,
    /// Description, empty when the uploader left none
    pub description: String,
    /// Publication time
    pub published_at: DateTime<Utc>,
    /// View count (0 when unavailable)
    pub view_count: u64,
    /// Like count (0 when hidden by the uploader)
    pub like_count: u64,
    /// Comment count (0 when comments are disabled)
    pub comment_count: u64,
    /// ISO-8601 duration, e.g. `PT4M13S`
    pub duration: String,
    /// Best available thumbnail URL
    pub thumbnail_url: String,
}

/// Validated comment or reply
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    /// Video the comment belongs to
    pub video_id: String,
    /// Comment id, unique within a run
    pub comment_id: String,
    /// Display text
    pub text: String,
    /// Author display name
    pub author: String,
    /// Publication time
    pub published_at: DateTime<Utc>,
    /// Like count (0 when unavailable)
    pub like_count: u64,
    /// Id of the top-level comment this replies to; `None` for top-level comments
    pub parent_id: Option<String>,
}

impl Comment {
    /// Whether this comment is a reply to another comment
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}
