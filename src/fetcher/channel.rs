//! Channel resolution

use tracing::{debug, info};

use crate::fetcher::pagination::Page;
use crate::fetcher::youtube_config::Endpoint;
use crate::fetcher::youtube_http::YouTubeHttpClient;
use crate::fetcher::ApiError;
use crate::identifier::{ChannelIdentifier, IdentifierError};
use crate::validator::{RawChannel, RecordValidator};
use crate::Channel;

/// Channel resolution errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Input could not be parsed as a handle or channel URL
    #[error("invalid channel reference: {0}")]
    InvalidInput(#[from] IdentifierError),

    /// Lookup returned no usable channel
    #[error("channel not found: {0}")]
    ChannelNotFound(String),

    /// Lookup call failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Resolves a handle or URL into a [`Channel`]
#[derive(Clone)]
pub struct ChannelResolver {
    client: YouTubeHttpClient,
}

impl ChannelResolver {
    /// Create a resolver on top of the API gateway
    pub fn new(client: YouTubeHttpClient) -> Self {
        Self { client }
    }

    /// Parse `handle_or_url` and look the channel up
    ///
    /// # Errors
    /// - `InvalidInput` if the input names no channel
    /// - `ChannelNotFound` if the lookup returns no channel with an uploads playlist
    /// - `Api` for gateway failures (unauthorized, quota, transient)
    pub async fn resolve(&self, handle_or_url: &str) -> Result<Channel, ResolveError> {
        let identifier = ChannelIdentifier::parse(handle_or_url)?;
        self.resolve_identifier(&identifier).await
    }

    /// Look up an already parsed identifier
    pub async fn resolve_identifier(
        &self,
        identifier: &ChannelIdentifier,
    ) -> Result<Channel, ResolveError> {
        let (key, value) = identifier.lookup_param();
        debug!("Resolving channel {} via {}", identifier, key);

        let page: Page<RawChannel> = match self
            .client
            .call(Endpoint::Channels, &[(key, value)])
            .await
        {
            Ok(page) => page,
            Err(ApiError::NotFound(detail)) => {
                return Err(ResolveError::ChannelNotFound(format!("{identifier} ({detail})")))
            }
            Err(e) => return Err(e.into()),
        };

        let raw = page
            .items
            .into_iter()
            .next()
            .ok_or_else(|| ResolveError::ChannelNotFound(identifier.to_string()))?;

        let channel = RecordValidator::validate_channel(raw)
            .map_err(|e| ResolveError::ChannelNotFound(format!("{identifier}: {e}")))?;

        info!(
            "Resolved {} to channel {} (uploads playlist {})",
            identifier, channel.id, channel.uploads_playlist_id
        );
        Ok(channel)
    }
}
