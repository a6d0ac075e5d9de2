//! Types for directory listings.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Kind of listing entry, as marked by the row icon's `alt` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Folder,
    File,
}

impl EntryKind {
    /// The `alt` text identifying this kind.
    pub fn alt_text(&self) -> &'static str {
        match self {
            EntryKind::Folder => "folder",
            EntryKind::File => "file",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alt_text())
    }
}

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// Anchor text, trimmed.
    pub name: String,
    /// Anchor `href`, as written in the page.
    pub link: String,
}

/// Errors from fetching a listing.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP error! status: {0}")]
    Status(u16),
}

/// Source of directory listings.
#[async_trait]
pub trait ListingFetcher: Send + Sync {
    /// Fetch the page at `url` and return its entries of the given kind,
    /// in page order.
    async fn list(&self, url: &str, kind: EntryKind) -> Result<Vec<ListingEntry>, ListingError>;
}
