//! Continuation-cursor pagination
//!
//! All list endpoints page the same way: each response may carry a
//! `nextPageToken`, and its absence marks the last page. [`PageCursor`]
//! tracks that state for loops that need to stop early (comment budget);
//! [`paginate_all`] drives it to the end for loops that don't.

use serde::Deserialize;
use std::future::Future;
use tracing::debug;

use crate::fetcher::{ApiError, ApiResult};

/// Maximum number of pages fetched from one listing.
/// Guards against a server that keeps returning a continuation token.
pub const MAX_PAGES: usize = 10_000;

/// One page of a list response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page; absent means empty
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Continuation cursor for the next page
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// What the next request should ask for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    /// First page, no cursor
    First,
    /// Continue from this cursor
    Token(String),
}

impl PageRequest {
    /// Cursor to send, if any
    pub fn token(&self) -> Option<&str> {
        match self {
            PageRequest::First => None,
            PageRequest::Token(token) => Some(token.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CursorState {
    Start,
    Next(String),
    Done,
}

/// Cursor state for one listing
#[derive(Debug)]
pub struct PageCursor {
    label: String,
    state: CursorState,
    pages: usize,
}

impl PageCursor {
    /// Start a new listing; `label` is used in logs and errors
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            state: CursorState::Start,
            pages: 0,
        }
    }

    /// The next page to request, or `None` once the listing is exhausted
    ///
    /// # Errors
    /// Returns [`ApiError::Malformed`] once [`MAX_PAGES`] pages were fetched
    /// and the server still reports more.
    pub fn next_request(&self) -> ApiResult<Option<PageRequest>> {
        if self.pages >= MAX_PAGES && self.state != CursorState::Done {
            return Err(ApiError::Malformed(format!(
                "{}: more than {MAX_PAGES} pages - possible pagination loop",
                self.label
            )));
        }

        Ok(match &self.state {
            CursorState::Start => Some(PageRequest::First),
            CursorState::Next(token) => Some(PageRequest::Token(token.clone())),
            CursorState::Done => None,
        })
    }

    /// Record a fetched page's continuation cursor
    ///
    /// A missing or empty token ends the listing.
    pub fn advance(&mut self, next_page_token: Option<String>) {
        self.pages += 1;
        self.state = match next_page_token {
            Some(token) if !token.is_empty() => CursorState::Next(token),
            _ => {
                debug!("{}: last page reached after {} page(s)", self.label, self.pages);
                CursorState::Done
            }
        };
    }

    /// Pages fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.pages
    }

    /// Whether the last page has been fetched
    pub fn is_done(&self) -> bool {
        self.state == CursorState::Done
    }
}

/// Fetch every page of a listing and concatenate the items in order
///
/// # Arguments
/// * `label` - Listing name for logs
/// * `fetch_page` - Fetches one page given the cursor (`None` for the first page)
pub async fn paginate_all<T, F, Fut>(label: &str, mut fetch_page: F) -> ApiResult<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = ApiResult<Page<T>>>,
{
    let mut items = Vec::new();
    let mut cursor = PageCursor::new(label);

    while let Some(request) = cursor.next_request()? {
        let page = fetch_page(request.token().map(str::to_string)).await?;
        debug!(
            "{}: page {} returned {} item(s)",
            label,
            cursor.pages_fetched() + 1,
            page.items.len()
        );
        items.extend(page.items);
        cursor.advance(page.next_page_token);
    }

    Ok(items)
}
