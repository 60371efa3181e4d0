//! Channel identifier parsing
//!
//! Accepts the forms users paste on the command line:
//! `@Handle`, `Handle`, `https://www.youtube.com/@Handle/videos`,
//! legacy `/c/Name` and `/user/Name` URLs, and `/channel/UC...` URLs.

use std::fmt;

const CHANNEL_ID_PREFIX: &str = "UC";
const CHANNEL_ID_LEN: usize = 24;

/// First path segments that never name a channel
const RESERVED_PATHS: &[&str] = &[
    "c", "user", "channel", "watch", "playlist", "shorts", "live", "embed", "results",
    "feed", "hashtag", "redirect", "account", "premium", "gaming", "music", "t",
];

/// Tabs that may follow a channel name in a profile URL
const CHANNEL_TABS: &[&str] = &[
    "videos", "featured", "shorts", "streams", "playlists", "community", "about",
];

/// How a channel was identified by the user
///
/// Each variant maps onto one lookup parameter of the channels endpoint.
///
/// # Examples
///
/// ```
/// use channel_harvester::identifier::ChannelIdentifier;
///
/// let id = ChannelIdentifier::parse("https://www.youtube.com/@GoogleDevelopers/videos").unwrap();
/// assert_eq!(id, ChannelIdentifier::Handle("GoogleDevelopers".to_string()));
/// assert_eq!(id.lookup_param(), ("forHandle", "@GoogleDevelopers".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChannelIdentifier {
    /// Channel handle, stored without the leading `@`
    Handle(String),
    /// Legacy username from a `/user/` URL
    Username(String),
    /// Raw channel id from a `/channel/` URL
    ChannelId(String),
}

impl ChannelIdentifier {
    /// Parse a handle or channel URL
    ///
    /// Legacy custom URLs (`/c/Name` and bare `/Name`) are treated as
    /// handles; the platform migrated custom URLs onto handles and resolves
    /// them the same way.
    ///
    /// # Errors
    ///
    /// Returns an error if no handle, username or channel id can be extracted.
    pub fn parse(input: &str) -> Result<Self, IdentifierError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(IdentifierError::Empty);
        }

        if let Some(path) = url_path(trimmed) {
            return Self::from_url_path(path, trimmed);
        }

        // Bare handle, with or without '@'
        let handle = trimmed.strip_prefix('@').unwrap_or(trimmed);
        validate_segment(handle, trimmed)?;
        Ok(Self::Handle(handle.to_string()))
    }

    fn from_url_path(path: &str, original: &str) -> Result<Self, IdentifierError> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let first = segments
            .next()
            .ok_or_else(|| IdentifierError::Unrecognized(original.to_string()))?;

        if let Some(handle) = first.strip_prefix('@') {
            validate_segment(handle, original)?;
            return Ok(Self::Handle(handle.to_string()));
        }

        let second = segments.next();

        // Legacy custom URL: youtube.com/Name, optionally followed by a channel tab
        if !RESERVED_PATHS.contains(&first)
            && second.map_or(true, |tab| CHANNEL_TABS.contains(&tab))
        {
            validate_segment(first, original)?;
            return Ok(Self::Handle(first.to_string()));
        }

        let value = second.ok_or_else(|| IdentifierError::Unrecognized(original.to_string()))?;
        validate_segment(value, original)?;

        match first {
            "c" => Ok(Self::Handle(value.to_string())),
            "user" => Ok(Self::Username(value.to_string())),
            "channel" => {
                if value.len() != CHANNEL_ID_LEN || !value.starts_with(CHANNEL_ID_PREFIX) {
                    return Err(IdentifierError::InvalidChannelId(value.to_string()));
                }
                Ok(Self::ChannelId(value.to_string()))
            }
            _ => Err(IdentifierError::Unrecognized(original.to_string())),
        }
    }

    /// Query parameter used by the channels endpoint to look this identifier up
    pub fn lookup_param(&self) -> (&'static str, String) {
        match self {
            Self::Handle(handle) => ("forHandle", format!("@{handle}")),
            Self::Username(name) => ("forUsername", name.clone()),
            Self::ChannelId(id) => ("id", id.clone()),
        }
    }
}

impl fmt::Display for ChannelIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handle(handle) => write!(f, "@{handle}"),
            Self::Username(name) => write!(f, "user/{name}"),
            Self::ChannelId(id) => write!(f, "channel/{id}"),
        }
    }
}

/// Return the path component if `input` looks like a youtube.com URL
fn url_path(input: &str) -> Option<&str> {
    let without_scheme = input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"))
        .unwrap_or(input);

    let host_end = without_scheme.find('/')?;
    let host = &without_scheme[..host_end];
    let host = host
        .strip_prefix("www.")
        .or_else(|| host.strip_prefix("m."))
        .unwrap_or(host);
    if host != "youtube.com" {
        return None;
    }

    let path = &without_scheme[host_end..];
    // Drop query string and fragment
    let end = path.find(['?', '#']).unwrap_or(path.len());
    Some(&path[..end])
}

fn validate_segment(segment: &str, original: &str) -> Result<(), IdentifierError> {
    if segment.is_empty() {
        return Err(IdentifierError::Unrecognized(original.to_string()));
    }
    let valid = segment
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if !valid {
        return Err(IdentifierError::InvalidCharacters(segment.to_string()));
    }
    Ok(())
}

/// Identifier parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// Empty input
    #[error("channel handle or URL cannot be empty")]
    Empty,

    /// Input is a URL but not one that names a channel
    #[error("unrecognized channel reference: {0}")]
    Unrecognized(String),

    /// Handle contains characters the platform does not allow
    #[error("invalid characters in channel handle: {0}")]
    InvalidCharacters(String),

    /// `/channel/` URL with a malformed id
    #[error("invalid channel id: {0}")]
    InvalidChannelId(String),
}
