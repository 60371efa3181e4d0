//! YouTube Data API endpoint configuration
//!
//! Paths, `part` selections and page sizes for the endpoints the harvester
//! uses. Every call costs 1 quota unit on the default 10,000 units/day key.

use std::fmt;

/// Page size for `playlistItems.list` (platform maximum)
pub const PLAYLIST_PAGE_SIZE: usize = 50;

/// Ids per `videos.list` call (platform maximum)
pub const VIDEO_BATCH_SIZE: usize = 50;

/// Page size for `commentThreads.list` and `comments.list` (platform maximum)
pub const COMMENT_PAGE_SIZE: usize = 100;

/// API endpoints used by the harvester
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `channels.list`: channel lookup
    Channels,
    /// `playlistItems.list`: uploads listing
    PlaylistItems,
    /// `videos.list`: batched video metadata
    Videos,
    /// `commentThreads.list`: top-level comments with inline replies
    CommentThreads,
    /// `comments.list`: replies to one top-level comment
    Comments,
}

impl Endpoint {
    /// Path relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Channels => "/channels",
            Endpoint::PlaylistItems => "/playlistItems",
            Endpoint::Videos => "/videos",
            Endpoint::CommentThreads => "/commentThreads",
            Endpoint::Comments => "/comments",
        }
    }

    /// Resource parts requested from this endpoint
    pub fn part(&self) -> &'static str {
        match self {
            Endpoint::Channels => "contentDetails",
            Endpoint::PlaylistItems => "contentDetails",
            Endpoint::Videos => "snippet,statistics,contentDetails",
            Endpoint::CommentThreads => "snippet,replies",
            Endpoint::Comments => "snippet",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::Channels => "channels",
            Endpoint::PlaylistItems => "playlistItems",
            Endpoint::Videos => "videos",
            Endpoint::CommentThreads => "commentThreads",
            Endpoint::Comments => "comments",
        };
        write!(f, "{name}")
    }
}
