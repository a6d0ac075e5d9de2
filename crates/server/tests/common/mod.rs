//! Common test utilities for API testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! over a temporary dataset directory and a mock listing fetcher, so the
//! HTTP surface can be exercised without a real file server.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use filmdex_core::{
    testing::MockListingFetcher, Config, DatasetConfig, JsonDirStore, ListingConfig,
    MovieLibrary, ServerConfig,
};
use filmdex_server::state::AppState;

/// Re-export fixtures for test convenience
pub use filmdex_core::testing::fixtures;

/// Listing page served as the movie list source.
pub const SOURCE_URL: &str = "http://files.example/Movies/2024/";

/// Test fixture for API testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_search() {
///     let fixture = TestFixture::new();
///     fixture.write_dataset("English.json", json!({ "2023": [...] }));
///
///     let response = fixture.get("/api/all/heat").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock listing fetcher - serve directory pages
    pub fetcher: MockListingFetcher,
    /// Dataset directory
    pub dataset_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture with a movie list source configured.
    pub fn new() -> Self {
        Self::with_source(Some(SOURCE_URL.to_string()))
    }

    /// Create a fixture with the given movie list source.
    pub fn with_source(source_url: Option<String>) -> Self {
        let dataset_dir = TempDir::new().expect("Failed to create temp dir");
        let fetcher = MockListingFetcher::new();

        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 3000, // Not used for in-process testing
            },
            dataset: DatasetConfig {
                dir: dataset_dir.path().to_path_buf(),
            },
            listing: ListingConfig {
                source_url,
                timeout_secs: 5,
            },
        };

        let library = Arc::new(MovieLibrary::new(
            Arc::new(JsonDirStore::new(dataset_dir.path())),
            Arc::new(fetcher.clone()),
        ));
        let state = Arc::new(AppState::new(config, library));
        let router = filmdex_server::api::create_router(state);

        Self {
            router,
            fetcher,
            dataset_dir,
        }
    }

    /// Write a dataset document into the fixture's directory.
    pub fn write_dataset(&self, document: &str, content: Value) {
        fixtures::write_dataset(self.dataset_dir.path(), document, &content);
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let (status, body_bytes) = self.get_raw(path).await;

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Send a GET request and return the raw body.
    pub async fn get_raw(&self, path: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        (status, body_bytes.to_vec())
    }
}
