//! Video enumeration
//!
//! Two stages: page through the channel's uploads playlist to collect video
//! ids, then look the ids up in batches of [`VIDEO_BATCH_SIZE`].

use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

use crate::fetcher::pagination::{paginate_all, Page};
use crate::fetcher::youtube_config::{Endpoint, PLAYLIST_PAGE_SIZE, VIDEO_BATCH_SIZE};
use crate::fetcher::youtube_http::YouTubeHttpClient;
use crate::fetcher::{ApiError, ApiResult};
use crate::validator::{RawPlaylistItem, RawVideo, RecordValidator};
use crate::{Channel, Video};

/// Enumerates all videos of a channel
#[derive(Clone)]
pub struct VideoEnumerator {
    client: YouTubeHttpClient,
}

impl VideoEnumerator {
    /// Create an enumerator on top of the API gateway
    pub fn new(client: YouTubeHttpClient) -> Self {
        Self { client }
    }

    /// All valid videos of `channel`, in uploads-playlist order
    ///
    /// Ids missing from the lookup response (deleted, private) and records
    /// that fail validation are skipped; duplicates are dropped.
    pub async fn enumerate(&self, channel: &Channel) -> ApiResult<Vec<Video>> {
        let ids = self.list_upload_ids(&channel.uploads_playlist_id).await?;
        info!("Found {} uploads on channel {}", ids.len(), channel.id);

        let videos = self.fetch_videos(&ids).await?;
        info!(
            "Collected metadata for {} of {} videos",
            videos.len(),
            ids.len()
        );
        Ok(videos)
    }

    /// Video ids listed in an uploads playlist, in playlist order
    pub async fn list_upload_ids(&self, playlist_id: &str) -> ApiResult<Vec<String>> {
        let items: Vec<RawPlaylistItem> = match paginate_all("uploads", |token| {
            self.fetch_upload_page(playlist_id, token)
        })
        .await
        {
            Ok(items) => items,
            // Channels without public uploads have no uploads playlist
            Err(ApiError::NotFound(detail)) => {
                info!("Uploads playlist {} not found ({}), channel has no videos", playlist_id, detail);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let mut ids = Vec::with_capacity(items.len());
        for item in &items {
            match RecordValidator::playlist_video_id(item) {
                Ok(id) => ids.push(id),
                Err(e) => debug!("Skipping playlist item: {}", e),
            }
        }
        Ok(ids)
    }

    async fn fetch_upload_page(
        &self,
        playlist_id: &str,
        token: Option<String>,
    ) -> ApiResult<Page<RawPlaylistItem>> {
        let mut params = vec![
            ("playlistId", playlist_id.to_string()),
            ("maxResults", PLAYLIST_PAGE_SIZE.to_string()),
        ];
        if let Some(token) = token {
            params.push(("pageToken", token));
        }
        self.client.call(Endpoint::PlaylistItems, &params).await
    }

    /// Look up and validate videos by id, preserving the order of `ids`
    pub async fn fetch_videos(&self, ids: &[String]) -> ApiResult<Vec<Video>> {
        let mut videos = Vec::with_capacity(ids.len());
        let mut seen: HashSet<String> = HashSet::with_capacity(ids.len());

        for (batch_index, chunk) in ids.chunks(VIDEO_BATCH_SIZE).enumerate() {
            debug!(
                "Fetching video batch {} ({} ids)",
                batch_index + 1,
                chunk.len()
            );

            let params = [
                ("id", chunk.join(",")),
                ("maxResults", VIDEO_BATCH_SIZE.to_string()),
            ];
            let page: Page<RawVideo> = self.client.call(Endpoint::Videos, &params).await?;

            let mut by_id: HashMap<String, Video> = HashMap::with_capacity(page.items.len());
            for raw in &page.items {
                match RecordValidator::validate_video(raw) {
                    Ok(video) => {
                        by_id.insert(video.video_id.clone(), video);
                    }
                    Err(e) => debug!("Skipping video: {}", e),
                }
            }

            for id in chunk {
                if !seen.insert(id.clone()) {
                    debug!("Skipping duplicate video {}", id);
                    continue;
                }
                match by_id.remove(id) {
                    Some(video) => videos.push(video),
                    None => debug!("Video {} missing from lookup response or invalid", id),
                }
            }
        }

        Ok(videos)
    }
}
