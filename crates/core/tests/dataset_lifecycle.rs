//! Dataset lifecycle integration tests.
//!
//! These tests run the whole path a dataset takes:
//! - Scraped documents normalized in place by the batch pass
//! - Year listings, search and detail lookups over the result
//! - Direct-link resolution against a mock file server

use std::fs;
use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use filmdex_core::{
    normalize_directory, strip_links, JsonDirStore, LinkResolution, MovieLibrary,
    testing::{fixtures, MockListingFetcher},
};

/// Test helper holding a scraped dataset directory and a library over it.
struct TestHarness {
    library: MovieLibrary,
    fetcher: MockListingFetcher,
    store: Arc<JsonDirStore>,
    dir: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(
            dir.path().join("English-Movies.json"),
            json!({
                "2023": [
                    { "name": "Oppenheimer.2023.1080p.BluRay.x264-GROUP", "link": "http://files.example/E/2023/Oppenheimer/" },
                    { "name": "Barbie (2023) [720p] [WEB-DL]", "link": "http://files.example/E/2023/Barbie/" },
                ],
                "2022": [
                    { "name": "Nope 2022 4K HDRip", "link": "http://files.example/E/2022/Nope/" },
                ],
            })
            .to_string(),
        )
        .expect("Failed to write dataset");
        fs::write(
            dir.path().join("Korean-Movies.json"),
            json!({
                "2019": [
                    { "name": "Parasite [2019] [1080p] [WEBRip]", "link": "http://files.example/K/2019/Parasite/", "category": "Korean" },
                ],
            })
            .to_string(),
        )
        .expect("Failed to write dataset");

        let store = Arc::new(JsonDirStore::new(dir.path()));
        let fetcher = MockListingFetcher::new();
        let library = MovieLibrary::new(store.clone(), Arc::new(fetcher.clone()));

        Self {
            library,
            fetcher,
            store,
            dir,
        }
    }

    fn normalize(&self) {
        let report = normalize_directory(self.store.as_ref()).expect("batch pass");
        assert_eq!(report.processed.len(), 2);
        assert!(report.skipped.is_empty());
    }
}

#[test]
fn test_batch_then_year_listing() {
    let harness = TestHarness::new();
    harness.normalize();

    let movies = harness.library.movies_by_year("english", 2023);
    let titles: Vec<_> = movies.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Oppenheimer.2023...x264-GROUP", "Barbie (2023)"]);
    assert_eq!(movies[1].url, "barbie-2023");
    assert_eq!(movies[1].kind, "WEB-DL");

    let public = serde_json::to_value(strip_links(movies)).unwrap();
    for movie in public.as_array().unwrap() {
        assert!(movie.get("link").is_none());
    }
}

#[test]
fn test_batch_then_search() {
    let harness = TestHarness::new();
    harness.normalize();

    let all = harness.library.search("all", "");
    let titles: Vec<_> = all.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Barbie (2023)", "Nope 2022", "Oppenheimer.2023...x264-GROUP", "Parasite"]
    );

    let korean = harness.library.search("korean", "para");
    assert_eq!(korean.len(), 1);
    assert_eq!(korean[0].category.as_deref(), Some("Korean"));
    assert_eq!(korean[0].resolution, "1080p");

    assert!(harness.library.search("english", "parasite").is_empty());
}

#[tokio::test]
async fn test_batch_then_detail_resolution() {
    let harness = TestHarness::new();
    harness.normalize();
    harness
        .fetcher
        .set_page(
            "http://files.example/E/2022/Nope/",
            fixtures::listing_page(&[
                ("folder", "/E/2022/", "Parent Directory"),
                ("file", "/E/2022/Nope/Nope.2022.2160p.mkv", "Nope.2022.2160p.mkv"),
            ]),
        )
        .await;

    let nope = harness
        .library
        .resolve_detail("english", 2022, "nope-2022")
        .await
        .expect("record exists");
    assert_eq!(nope.link, LinkResolution::Resolved);
    assert_eq!(nope.record.link, "http://files.example/E/2022/Nope/Nope.2022.2160p.mkv");
    assert_eq!(nope.record.resolution, "4K");
    assert_eq!(nope.record.kind, "HDRip");

    // Barbie's directory was never served.
    let barbie = harness
        .library
        .resolve_detail("english", 2023, "barbie-2023")
        .await
        .expect("record exists");
    assert_eq!(barbie.link, LinkResolution::Unresolved);
    assert_eq!(barbie.record.link, "http://files.example/E/2023/Barbie/");
}

#[test]
fn test_batch_rerun_is_stable() {
    let harness = TestHarness::new();
    harness.normalize();
    let path = harness.dir.path().join("Korean-Movies.json");
    let before = fs::read_to_string(&path).unwrap();

    harness.normalize();
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}
