//! Mock listing fetcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::listing::{parse_listing, EntryKind, ListingEntry, ListingError, ListingFetcher};

/// A recorded listing request for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub kind: EntryKind,
}

/// Mock implementation of the ListingFetcher trait.
///
/// Serves canned HTML pages by exact URL and runs them through the real
/// listing parser. Unknown URLs answer with HTTP 404.
///
/// # Example
///
/// ```rust,ignore
/// use filmdex_core::testing::{MockListingFetcher, fixtures};
///
/// let fetcher = MockListingFetcher::new();
/// fetcher.set_page(
///     "http://files.example/Movies/2024/",
///     fixtures::listing_page(&[("folder", "/Movies/2024/Heat/", "Heat")]),
/// ).await;
///
/// let folders = fetcher.list("http://files.example/Movies/2024/", EntryKind::Folder).await?;
/// assert_eq!(folders.len(), 1);
/// assert_eq!(fetcher.requests().await.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockListingFetcher {
    /// Page bodies by URL.
    pages: Arc<RwLock<HashMap<String, String>>>,
    /// Per-URL failures.
    errors: Arc<RwLock<HashMap<String, ListingError>>>,
    /// If set, the next request fails with this error regardless of URL.
    next_error: Arc<RwLock<Option<ListingError>>>,
    /// Every request made, in order.
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
}

impl MockListingFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`.
    pub async fn set_page(&self, url: impl Into<String>, html: impl Into<String>) {
        self.pages.write().await.insert(url.into(), html.into());
    }

    /// Fail every request for `url` with `error`.
    pub async fn fail_url(&self, url: impl Into<String>, error: ListingError) {
        self.errors.write().await.insert(url.into(), error);
    }

    /// Fail the next request, whatever its URL.
    pub async fn fail_next(&self, error: ListingError) {
        *self.next_error.write().await = Some(error);
    }

    /// All requests made so far.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }

    /// Forget recorded requests.
    pub async fn clear_requests(&self) {
        self.requests.write().await.clear();
    }
}

fn copy_error(error: &ListingError) -> ListingError {
    match error {
        ListingError::Client(msg) => ListingError::Client(msg.clone()),
        ListingError::Request(msg) => ListingError::Request(msg.clone()),
        ListingError::Timeout => ListingError::Timeout,
        ListingError::Status(code) => ListingError::Status(*code),
    }
}

#[async_trait]
impl ListingFetcher for MockListingFetcher {
    async fn list(&self, url: &str, kind: EntryKind) -> Result<Vec<ListingEntry>, ListingError> {
        self.requests.write().await.push(RecordedRequest {
            url: url.to_string(),
            kind,
        });

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }
        if let Some(error) = self.errors.read().await.get(url) {
            return Err(copy_error(error));
        }

        match self.pages.read().await.get(url) {
            Some(html) => Ok(parse_listing(html, kind)),
            None => Err(ListingError::Status(404)),
        }
    }
}
