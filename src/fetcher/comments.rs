//! Comment aggregation under a comment budget
//!
//! For one video, top-level comment threads are paged in platform order. Each
//! thread emits its top-level comment, then its inline replies, then (if the
//! thread reports more replies than were inlined) the remaining replies from
//! `comments.list`. Collection stops the moment the budget is used up; replies
//! fetched before that point are kept.

use std::collections::HashSet;
use tracing::debug;

use crate::fetcher::pagination::{Page, PageCursor};
use crate::fetcher::youtube_config::{Endpoint, COMMENT_PAGE_SIZE};
use crate::fetcher::youtube_http::YouTubeHttpClient;
use crate::fetcher::{ApiError, ApiResult};
use crate::validator::{RawComment, RawCommentThread, RecordValidator};
use crate::Comment;

/// Comments collected for one video under a budget
struct Collection<'a> {
    video_id: &'a str,
    budget: usize,
    comments: Vec<Comment>,
    seen: HashSet<String>,
}

impl<'a> Collection<'a> {
    fn new(video_id: &'a str, budget: usize) -> Self {
        Self {
            video_id,
            budget,
            comments: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn remaining(&self) -> usize {
        self.budget.saturating_sub(self.comments.len())
    }

    fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    /// Page size for the next request
    fn page_size(&self) -> usize {
        self.remaining().clamp(1, COMMENT_PAGE_SIZE)
    }

    /// Validate and append a comment; returns its id if it was accepted
    fn push(&mut self, raw: &RawComment, parent_id: Option<&str>) -> Option<String> {
        if self.is_full() {
            return None;
        }
        let comment = match RecordValidator::validate_comment(raw, self.video_id, parent_id) {
            Ok(comment) => comment,
            Err(e) => {
                debug!("Skipping comment on video {}: {}", self.video_id, e);
                return None;
            }
        };
        if !self.seen.insert(comment.comment_id.clone()) {
            debug!("Skipping duplicate comment {}", comment.comment_id);
            return None;
        }
        let id = comment.comment_id.clone();
        self.comments.push(comment);
        Some(id)
    }
}

/// Collects comments and replies for videos
#[derive(Clone)]
pub struct CommentAggregator {
    client: YouTubeHttpClient,
}

impl CommentAggregator {
    /// Create an aggregator on top of the API gateway
    pub fn new(client: YouTubeHttpClient) -> Self {
        Self { client }
    }

    /// Collect up to `remaining_budget` comments for `video_id`
    ///
    /// Returns the comments (top-level comments each followed by their replies)
    /// and the number consumed from the budget, which equals `comments.len()`.
    /// A zero budget returns immediately without calling the API. Videos with
    /// comments disabled or that no longer exist yield an empty result.
    ///
    /// # Errors
    /// Fatal gateway errors (unauthorized, quota, exhausted transient, malformed).
    pub async fn collect(
        &self,
        video_id: &str,
        remaining_budget: usize,
    ) -> ApiResult<(Vec<Comment>, usize)> {
        let mut collection = Collection::new(video_id, remaining_budget);
        let mut cursor = PageCursor::new(format!("comment threads of {video_id}"));

        while !collection.is_full() {
            let Some(request) = cursor.next_request()? else {
                break;
            };

            let mut params = vec![
                ("videoId", video_id.to_string()),
                ("maxResults", collection.page_size().to_string()),
                ("textFormat", "plainText".to_string()),
            ];
            if let Some(token) = request.token() {
                params.push(("pageToken", token.to_string()));
            }

            let page: Page<RawCommentThread> =
                match self.client.call(Endpoint::CommentThreads, &params).await {
                    Ok(page) => page,
                    Err(ApiError::CommentsDisabled(_)) => {
                        debug!("Comments are disabled for video {}", video_id);
                        break;
                    }
                    Err(ApiError::NotFound(detail)) => {
                        debug!("Comments for video {} not available: {}", video_id, detail);
                        break;
                    }
                    Err(e) => return Err(e),
                };
            cursor.advance(page.next_page_token);

            for thread in page.items {
                if collection.is_full() {
                    break;
                }
                self.collect_thread(thread, &mut collection).await?;
            }
        }

        let consumed = collection.comments.len();
        debug!(
            "Collected {} comment(s) for video {} ({} thread page(s))",
            consumed,
            video_id,
            cursor.pages_fetched()
        );
        Ok((collection.comments, consumed))
    }

    async fn collect_thread(
        &self,
        raw: RawCommentThread,
        collection: &mut Collection<'_>,
    ) -> ApiResult<()> {
        let thread = match RecordValidator::split_thread(raw) {
            Ok(thread) => thread,
            Err(e) => {
                debug!("Skipping comment thread on video {}: {}", collection.video_id, e);
                return Ok(());
            }
        };

        // Replies are only emitted under an accepted top-level comment
        let Some(parent_id) = collection.push(&thread.top_level, None) else {
            return Ok(());
        };

        for reply in &thread.inline_replies {
            if collection.is_full() {
                return Ok(());
            }
            collection.push(reply, Some(&parent_id));
        }

        if thread.has_more_replies() && !collection.is_full() {
            self.collect_remaining_replies(&parent_id, collection).await?;
        }
        Ok(())
    }

    /// Page through `comments.list` for one thread, skipping replies already emitted
    async fn collect_remaining_replies(
        &self,
        parent_id: &str,
        collection: &mut Collection<'_>,
    ) -> ApiResult<()> {
        let mut cursor = PageCursor::new(format!("replies to {parent_id}"));

        while !collection.is_full() {
            let Some(request) = cursor.next_request()? else {
                break;
            };

            let mut params = vec![
                ("parentId", parent_id.to_string()),
                ("maxResults", COMMENT_PAGE_SIZE.to_string()),
                ("textFormat", "plainText".to_string()),
            ];
            if let Some(token) = request.token() {
                params.push(("pageToken", token.to_string()));
            }

            let page: Page<RawComment> = match self.client.call(Endpoint::Comments, &params).await
            {
                Ok(page) => page,
                Err(ApiError::NotFound(detail)) => {
                    debug!("Replies to {} not available: {}", parent_id, detail);
                    break;
                }
                Err(e) => return Err(e),
            };
            cursor.advance(page.next_page_token);

            for reply in &page.items {
                if collection.is_full() {
                    break;
                }
                // Inline replies come back here too; `push` drops them as duplicates
                collection.push(reply, Some(parent_id));
            }
        }

        Ok(())
    }
}
