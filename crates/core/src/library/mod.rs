//! Queries over the stored datasets.
//!
//! [`MovieLibrary`] ties a [`DatasetStore`] to a [`ListingFetcher`] and
//! answers the three read operations the HTTP layer exposes: records for a
//! category and year, substring search, and detail lookup with direct-link
//! resolution. None of them fail: a missing document, year or record is a
//! logged warning and an empty result; a malformed document is a logged
//! error and is treated as absent.

mod detail;
mod search;

use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::dataset::{Dataset, DatasetStore, MovieRecord, StoreError, Year};
use crate::listing::{resolve_link, EntryKind, ListingEntry, ListingError, ListingFetcher};
use crate::metrics;

pub use detail::{LinkResolution, ResolvedMovie};
pub use search::ALL_CATEGORIES;

/// Read access to the movie datasets.
pub struct MovieLibrary {
    store: Arc<dyn DatasetStore>,
    listing: Arc<dyn ListingFetcher>,
}

impl MovieLibrary {
    pub fn new(store: Arc<dyn DatasetStore>, listing: Arc<dyn ListingFetcher>) -> Self {
        Self { store, listing }
    }

    /// The underlying dataset store.
    pub fn store(&self) -> &Arc<dyn DatasetStore> {
        &self.store
    }

    /// Records stored under `year` in the document for `category`.
    ///
    /// Empty when no document matches the category or the year is absent.
    pub fn movies_by_year(&self, category: &str, year: Year) -> Vec<MovieRecord> {
        let Some(dataset) = self.load_category(category, "year") else {
            return Vec::new();
        };

        let records = dataset.year(year).to_vec();
        if records.is_empty() {
            warn!(category = %category, year, "No movies for year");
            record_lookup("year", "not_found");
        } else {
            debug!(category = %category, year, count = records.len(), "Loaded movies for year");
            record_lookup("year", "ok");
        }
        records
    }

    /// Folder entries of the remote listing page at `url`, with links
    /// resolved against `url`.
    pub async fn folder_listing(&self, url: &str) -> Result<Vec<ListingEntry>, ListingError> {
        let folders = self.listing.list(url, EntryKind::Folder).await?;
        Ok(folders
            .into_iter()
            .map(|entry| ListingEntry {
                link: resolve_link(url, &entry.link),
                name: entry.name,
            })
            .collect())
    }

    /// Load the document selected by `category`.
    ///
    /// Logs and counts the failure and returns `None` when no document
    /// matches or the matching one cannot be read.
    fn load_category(&self, category: &str, operation: &str) -> Option<Dataset<MovieRecord>> {
        let document = match self.store.find_document(category) {
            Ok(Some(document)) => document,
            Ok(None) => {
                warn!(category = %category, "No matching dataset for category");
                record_lookup(operation, "not_found");
                return None;
            }
            Err(e) => {
                error!(category = %category, error = %e, "Failed to list dataset documents");
                record_lookup(operation, "error");
                return None;
            }
        };

        match self.store.load(&document) {
            Ok(dataset) => Some(dataset),
            Err(e) => {
                log_load_failure(&document, &e);
                record_lookup(operation, "error");
                None
            }
        }
    }
}

fn log_load_failure(document: &str, e: &StoreError) {
    match e {
        StoreError::NotFound(_) => warn!(document = %document, "Dataset disappeared before load"),
        _ => error!(document = %document, error = %e, "Failed to load dataset"),
    }
}

fn record_lookup(operation: &str, outcome: &str) {
    metrics::DATASET_LOOKUPS
        .with_label_values(&[operation, outcome])
        .inc();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::JsonDirStore;
    use crate::testing::{fixtures, MockListingFetcher};
    use serde_json::json;
    use tempfile::TempDir;

    pub(super) fn library_over(dir: &TempDir) -> (MovieLibrary, MockListingFetcher) {
        let fetcher = MockListingFetcher::new();
        let library = MovieLibrary::new(
            Arc::new(JsonDirStore::new(dir.path())),
            Arc::new(fetcher.clone()),
        );
        (library, fetcher)
    }

    fn english_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fixtures::write_dataset(
            dir.path(),
            "English-Movies.json",
            &json!({
                "2022": [fixtures::movie_value("Heat.1995.1080p.BluRay.x264", "http://h.example/2022/Heat/")],
                "2023": [
                    fixtures::movie_value("Some Movie [2023] [WEBRip]", "http://h.example/2023/Some/"),
                    fixtures::movie_value("Other Movie 720p", "http://h.example/2023/Other/"),
                ],
            }),
        );
        dir
    }

    #[test]
    fn test_movies_by_year() {
        let dir = english_dir();
        let (library, _) = library_over(&dir);

        let movies = library.movies_by_year("english", 2023);
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "Some Movie");
        assert_eq!(movies[1].resolution, "720p");
    }

    #[test]
    fn test_movies_by_year_absent_year_is_empty() {
        let dir = english_dir();
        let (library, _) = library_over(&dir);

        assert!(library.movies_by_year("ENGLISH", 1999).is_empty());
    }

    #[test]
    fn test_movies_by_year_unknown_category_is_empty() {
        let dir = english_dir();
        let (library, _) = library_over(&dir);

        assert!(library.movies_by_year("action", 2022).is_empty());
    }

    #[test]
    fn test_movies_by_year_malformed_document_is_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Hindi.json"), "[1, 2, 3]").unwrap();
        let (library, _) = library_over(&dir);

        assert!(library.movies_by_year("hindi", 2022).is_empty());
    }

    #[test]
    fn test_movies_by_year_missing_directory_is_empty() {
        let fetcher = MockListingFetcher::new();
        let library = MovieLibrary::new(
            Arc::new(JsonDirStore::new("/nonexistent/filmdex")),
            Arc::new(fetcher),
        );

        assert!(library.movies_by_year("english", 2022).is_empty());
    }

    #[tokio::test]
    async fn test_folder_listing() {
        let dir = TempDir::new().unwrap();
        let (library, fetcher) = library_over(&dir);
        let url = "http://h.example/Movies/2024/";
        fetcher
            .set_page(
                url,
                fixtures::listing_page(&[
                    ("folder", "/Movies/2024/Heat%20(1995)/", "Heat (1995)"),
                    ("file", "/Movies/2024/index.txt", "index.txt"),
                ]),
            )
            .await;

        let folders = library.folder_listing(url).await.unwrap();
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].name, "Heat (1995)");
        assert_eq!(folders[0].link, "http://h.example/Movies/2024/Heat%20(1995)/");

        assert!(matches!(
            library.folder_listing("http://h.example/missing/").await,
            Err(ListingError::Status(404))
        ));
    }
}
