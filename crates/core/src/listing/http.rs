//! reqwest-backed listing fetcher.

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::ListingConfig;
use crate::metrics;

use super::parser::parse_listing;
use super::{EntryKind, ListingEntry, ListingError, ListingFetcher};

/// Fetches listing pages over HTTP and parses them.
pub struct HttpListingClient {
    client: Client,
}

impl HttpListingClient {
    /// Create a client whose requests time out after `timeout_secs`.
    pub fn new(config: &ListingConfig) -> Result<Self, ListingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| ListingError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    async fn fetch_page(&self, url: &str) -> Result<String, ListingError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ListingError::Timeout
            } else {
                ListingError::Request(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ListingError::Status(status.as_u16()));
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                ListingError::Timeout
            } else {
                ListingError::Request(e.to_string())
            }
        })
    }
}

#[async_trait]
impl ListingFetcher for HttpListingClient {
    async fn list(&self, url: &str, kind: EntryKind) -> Result<Vec<ListingEntry>, ListingError> {
        let start = Instant::now();
        let result = self.fetch_page(url).await;
        metrics::LISTING_FETCH_DURATION.observe(start.elapsed().as_secs_f64());

        let label = match &result {
            Ok(_) => "success",
            Err(ListingError::Status(_)) => "http_error",
            Err(ListingError::Timeout) => "timeout",
            Err(_) => "error",
        };
        metrics::LISTING_FETCHES.with_label_values(&[label]).inc();

        let html = result.map_err(|e| {
            warn!(url = %url, error = %e, "Listing fetch failed");
            e
        })?;

        let entries = parse_listing(&html, kind);
        debug!(url = %url, kind = %kind, count = entries.len(), "Parsed listing");
        Ok(entries)
    }
}
