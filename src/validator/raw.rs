//! Raw API payloads
//!
//! Every field is optional so that a response with missing or oddly typed
//! fields still deserializes; deciding what is acceptable is the validator's
//! job. Fields are only visible inside the validator module.

use serde::Deserialize;
use serde_json::Value;

/// Raw `channels.list` item
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawChannel {
    pub(super) id: Option<String>,
    pub(super) content_details: Option<RawChannelContentDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawChannelContentDetails {
    pub(super) related_playlists: Option<RawRelatedPlaylists>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct RawRelatedPlaylists {
    pub(super) uploads: Option<String>,
}

/// Raw `playlistItems.list` item
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlaylistItem {
    pub(super) id: Option<String>,
    pub(super) content_details: Option<RawPlaylistItemContentDetails>,
    pub(super) snippet: Option<RawPlaylistItemSnippet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawPlaylistItemContentDetails {
    pub(super) video_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawPlaylistItemSnippet {
    pub(super) resource_id: Option<RawResourceId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawResourceId {
    pub(super) video_id: Option<String>,
}

/// Raw `videos.list` item
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVideo {
    pub(super) id: Option<String>,
    pub(super) snippet: Option<RawVideoSnippet>,
    pub(super) statistics: Option<RawVideoStatistics>,
    pub(super) content_details: Option<RawVideoContentDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawVideoSnippet {
    pub(super) title: Option<String>,
    pub(super) description: Option<String>,
    pub(super) published_at: Option<String>,
    pub(super) thumbnails: Option<RawThumbnails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct RawThumbnails {
    pub(super) high: Option<RawThumbnail>,
    pub(super) medium: Option<RawThumbnail>,
    pub(super) default: Option<RawThumbnail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct RawThumbnail {
    pub(super) url: Option<String>,
}

// Counts arrive as decimal strings, but accept numbers too
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawVideoStatistics {
    pub(super) view_count: Option<Value>,
    pub(super) like_count: Option<Value>,
    pub(super) comment_count: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct RawVideoContentDetails {
    pub(super) duration: Option<String>,
}

/// Raw `commentThreads.list` item
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCommentThread {
    pub(super) id: Option<String>,
    pub(super) snippet: Option<RawCommentThreadSnippet>,
    pub(super) replies: Option<RawReplies>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawCommentThreadSnippet {
    pub(super) top_level_comment: Option<RawComment>,
    pub(super) total_reply_count: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct RawReplies {
    #[serde(default)]
    pub(super) comments: Vec<RawComment>,
}

/// Raw comment, either a thread's top-level comment or a reply
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawComment {
    pub(super) id: Option<String>,
    pub(super) snippet: Option<RawCommentSnippet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawCommentSnippet {
    pub(super) text_display: Option<String>,
    pub(super) text_original: Option<String>,
    pub(super) author_display_name: Option<String>,
    pub(super) published_at: Option<String>,
    pub(super) like_count: Option<Value>,
}
