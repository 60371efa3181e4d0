//! Record validation
//!
//! Converts raw API payloads ([`raw`]) into the typed records the rest of the
//! crate works with. This is the only module that looks inside raw payloads.
//!
//! Normalization rules:
//! - A missing count (hidden likes, disabled comments) becomes `0`
//! - A count that is present but negative or non-numeric is rejected
//! - Timestamps must be RFC 3339
//! - A missing description becomes an empty string
//! - Thumbnails fall back `high` -> `medium` -> `default`

pub mod raw;

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;

use crate::{Channel, Comment, Video};
pub use raw::{RawChannel, RawComment, RawCommentThread, RawPlaylistItem, RawVideo};

/// Length of a platform video id
pub const VIDEO_ID_LEN: usize = 11;

/// Kind of record that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Channel lookup result
    Channel,
    /// Video
    Video,
    /// Comment thread envelope
    CommentThread,
    /// Comment or reply
    Comment,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecordKind::Channel => "channel",
            RecordKind::Video => "video",
            RecordKind::CommentThread => "comment thread",
            RecordKind::Comment => "comment",
        };
        write!(f, "{s}")
    }
}

/// Validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Required field missing or malformed
    #[error("invalid {kind} record {id}: {reason}")]
    InvalidRecord {
        /// Record kind
        kind: RecordKind,
        /// Record id, or `<unknown>` when the id itself is missing
        id: String,
        /// What was wrong
        reason: String,
    },
}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A comment thread split into its parts
///
/// The top-level comment always carries an id (taken from the thread when the
/// comment itself lacks one).
#[derive(Debug, Clone)]
pub struct CommentThread {
    /// Top-level comment
    pub top_level: RawComment,
    /// Replies returned inline with the thread
    pub inline_replies: Vec<RawComment>,
    /// Total replies the platform reports for the thread
    pub total_reply_count: u64,
}

impl CommentThread {
    /// Whether replies beyond the inline ones must be fetched separately
    pub fn has_more_replies(&self) -> bool {
        self.total_reply_count > self.inline_replies.len() as u64
    }
}

/// Stateless validator for raw API records
pub struct RecordValidator;

impl RecordValidator {
    /// Validate a channel lookup result
    ///
    /// # Errors
    /// Returns `InvalidRecord` if the id or uploads playlist is missing.
    pub fn validate_channel(raw: RawChannel) -> ValidationResult<Channel> {
        let id = non_empty(raw.id).ok_or_else(|| invalid(RecordKind::Channel, None, "missing id"))?;

        let uploads = raw
            .content_details
            .and_then(|d| d.related_playlists)
            .and_then(|p| non_empty(p.uploads))
            .ok_or_else(|| {
                invalid(RecordKind::Channel, Some(&id), "missing uploads playlist")
            })?;

        Ok(Channel {
            id,
            uploads_playlist_id: uploads,
        })
    }

    /// Video id referenced by an uploads playlist item
    ///
    /// Prefers `contentDetails.videoId`, falling back to `snippet.resourceId.videoId`.
    pub fn playlist_video_id(raw: &RawPlaylistItem) -> ValidationResult<String> {
        raw.content_details
            .as_ref()
            .and_then(|d| d.video_id.clone())
            .or_else(|| {
                raw.snippet
                    .as_ref()
                    .and_then(|s| s.resource_id.as_ref())
                    .and_then(|r| r.video_id.clone())
            })
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ValidationError::InvalidRecord {
                    kind: RecordKind::Video,
                    id: raw.id.clone().unwrap_or_else(|| "<unknown>".to_string()),
                    reason: "playlist item has no video id".to_string(),
                }
            })
    }

    /// Validate a `videos.list` item
    ///
    /// # Errors
    /// Returns `InvalidRecord` on a malformed id, missing title, unparseable
    /// publication time, negative or non-numeric counts, missing duration or
    /// missing thumbnail.
    pub fn validate_video(raw: &RawVideo) -> ValidationResult<Video> {
        let id = raw
            .id
            .clone()
            .ok_or_else(|| invalid(RecordKind::Video, None, "missing id"))?;
        let fail = |reason: String| invalid(RecordKind::Video, Some(&id), reason);

        if !is_valid_video_id(&id) {
            return Err(fail(format!(
                "video id must be {VIDEO_ID_LEN} characters of [A-Za-z0-9_-]"
            )));
        }

        let snippet = raw
            .snippet
            .as_ref()
            .ok_or_else(|| fail("missing snippet".to_string()))?;
        let title = snippet
            .title
            .clone()
            .ok_or_else(|| fail("missing title".to_string()))?;
        let published_at = parse_timestamp(snippet.published_at.as_deref()).map_err(&fail)?;

        let thumbnail_url = snippet
            .thumbnails
            .as_ref()
            .and_then(|t| {
                [&t.high, &t.medium, &t.default]
                    .into_iter()
                    .flatten()
                    .find_map(|thumb| non_empty(thumb.url.clone()))
            })
            .ok_or_else(|| fail("missing thumbnail".to_string()))?;

        let stats = raw.statistics.clone().unwrap_or_default();
        let view_count = parse_count(stats.view_count.as_ref(), "viewCount").map_err(&fail)?;
        let like_count = parse_count(stats.like_count.as_ref(), "likeCount").map_err(&fail)?;
        let comment_count =
            parse_count(stats.comment_count.as_ref(), "commentCount").map_err(&fail)?;

        let duration = raw
            .content_details
            .as_ref()
            .and_then(|d| non_empty(d.duration.clone()))
            .ok_or_else(|| fail("missing duration".to_string()))?;
        if !duration.starts_with('P') {
            return Err(fail(format!("duration is not ISO-8601: {duration}")));
        }

        Ok(Video {
            video_id: id.clone(),
            title,
            description: snippet.description.clone().unwrap_or_default(),
            published_at,
            view_count,
            like_count,
            comment_count,
            duration,
            thumbnail_url,
        })
    }

    /// Split a comment thread into its top-level comment and replies
    ///
    /// # Errors
    /// Returns `InvalidRecord` if the thread has no top-level comment or its
    /// reply count is malformed.
    pub fn split_thread(raw: RawCommentThread) -> ValidationResult<CommentThread> {
        let thread_id = raw.id.clone();
        let fail = |reason: &str| invalid(RecordKind::CommentThread, thread_id.as_deref(), reason);

        let snippet = raw.snippet.ok_or_else(|| fail("missing snippet"))?;
        let mut top_level = snippet
            .top_level_comment
            .ok_or_else(|| fail("missing top-level comment"))?;
        if top_level.id.as_deref().map_or(true, str::is_empty) {
            top_level.id = thread_id.clone();
        }

        let total_reply_count = parse_count(snippet.total_reply_count.as_ref(), "totalReplyCount")
            .map_err(|reason| fail(&reason))?;

        Ok(CommentThread {
            top_level,
            inline_replies: raw.replies.map(|r| r.comments).unwrap_or_default(),
            total_reply_count,
        })
    }

    /// Validate a comment or reply
    ///
    /// # Arguments
    /// * `raw` - Raw comment
    /// * `video_id` - Video the comment was fetched for
    /// * `parent_id` - Top-level comment id for replies, `None` for top-level comments
    ///
    /// # Errors
    /// Returns `InvalidRecord` on a missing id, text or author, unparseable
    /// publication time, or negative/non-numeric like count.
    pub fn validate_comment(
        raw: &RawComment,
        video_id: &str,
        parent_id: Option<&str>,
    ) -> ValidationResult<Comment> {
        let id = non_empty(raw.id.clone())
            .ok_or_else(|| invalid(RecordKind::Comment, None, "missing id"))?;
        let fail = |reason: String| invalid(RecordKind::Comment, Some(&id), reason);

        let snippet = raw
            .snippet
            .as_ref()
            .ok_or_else(|| fail("missing snippet".to_string()))?;
        let text = snippet
            .text_display
            .clone()
            .or_else(|| snippet.text_original.clone())
            .ok_or_else(|| fail("missing text".to_string()))?;
        let author = snippet
            .author_display_name
            .clone()
            .ok_or_else(|| fail("missing author".to_string()))?;
        let published_at = parse_timestamp(snippet.published_at.as_deref()).map_err(&fail)?;
        let like_count = parse_count(snippet.like_count.as_ref(), "likeCount").map_err(&fail)?;

        Ok(Comment {
            video_id: video_id.to_string(),
            comment_id: id.clone(),
            text,
            author,
            published_at,
            like_count,
            parent_id: parent_id.map(str::to_string),
        })
    }
}

/// Whether `id` has the shape of a platform video id
pub fn is_valid_video_id(id: &str) -> bool {
    id.len() == VIDEO_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn invalid(kind: RecordKind, id: Option<&str>, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidRecord {
        kind,
        id: id.unwrap_or("<unknown>").to_string(),
        reason: reason.into(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn parse_timestamp(value: Option<&str>) -> Result<DateTime<Utc>, String> {
    let value = value.ok_or_else(|| "missing publishedAt".to_string())?;
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid publishedAt '{value}': {e}"))
}

/// Parse a count; absent means 0
fn parse_count(value: Option<&Value>, field: &str) -> Result<u64, String> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| format!("{field} must be a non-negative integer, got {n}")),
        Some(Value::String(s)) => {
            let s = s.trim();
            match s.parse::<u64>() {
                Ok(count) => Ok(count),
                Err(_) if s.parse::<i64>().is_ok() => {
                    Err(format!("{field} must be non-negative, got {s}"))
                }
                Err(_) => Err(format!("{field} is not a number: '{s}'")),
            }
        }
        Some(other) => Err(format!("{field} has unexpected type: {other}")),
    }
}
