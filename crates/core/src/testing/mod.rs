//! Testing utilities and mock implementations.
//!
//! This module provides a mock listing fetcher and fixtures for building
//! listing pages and dataset documents, so the library and HTTP layers can
//! be tested without a real file server.
//!
//! # Example
//!
//! ```rust,ignore
//! use filmdex_core::testing::{MockListingFetcher, fixtures};
//!
//! let dir = tempfile::TempDir::new()?;
//! fixtures::write_dataset(dir.path(), "English.json", &serde_json::json!({
//!     "2023": [fixtures::movie_value("Heat (1995) [720p]", "http://files.example/Heat/")],
//! }));
//!
//! let fetcher = MockListingFetcher::new();
//! fetcher.set_page("http://files.example/Heat/", fixtures::listing_page(&[
//!     ("file", "/Heat/heat.mkv", "heat.mkv"),
//! ])).await;
//! ```

mod mock_listing;

pub use mock_listing::{MockListingFetcher, RecordedRequest};

/// Test fixtures and helper functions.
pub mod fixtures {
    use serde_json::{Map, Value};
    use std::path::Path;

    use crate::dataset::{MovieRecord, RawRecord};
    use crate::normalize::enrich_record;

    /// An h5ai-style listing page with one row per `(alt, href, name)`.
    pub fn listing_page(rows: &[(&str, &str, &str)]) -> String {
        let body: String = rows
            .iter()
            .map(|(alt, href, name)| {
                format!(
                    "<tr><td class=\"fb-i\"><img src=\"/_h5ai/public/images/themes/default/{alt}.svg\" alt=\"{alt}\"/></td>\
                     <td class=\"fb-n\"><a href=\"{href}\">{name}</a></td>\
                     <td class=\"fb-d\">2024-03-01 12:00</td><td class=\"fb-s\"></td></tr>\n"
                )
            })
            .collect();

        format!(
            "<!DOCTYPE html>\n<html><head><title>index</title></head><body>\n\
             <div id=\"fallback\"><table>\n\
             <tr><th class=\"fb-i\"></th><th class=\"fb-n\"><span>Name</span></th>\
             <th class=\"fb-d\"><span>Last modified</span></th><th class=\"fb-s\"><span>Size</span></th></tr>\n\
             {body}</table></div>\n</body></html>\n"
        )
    }

    /// A scraper record with no extra fields.
    pub fn raw_record(name: &str, link: &str) -> RawRecord {
        RawRecord {
            name: name.to_string(),
            link: link.to_string(),
            extra: Map::new(),
        }
    }

    /// A normalized record derived from `name`.
    pub fn movie_record(name: &str, link: &str) -> MovieRecord {
        enrich_record(raw_record(name, link))
    }

    /// A normalized record as the JSON stored in dataset documents.
    pub fn movie_value(name: &str, link: &str) -> Value {
        serde_json::to_value(movie_record(name, link)).expect("record serializes")
    }

    /// Write a dataset document into `dir`.
    pub fn write_dataset(dir: &Path, document: &str, content: &Value) {
        let text = serde_json::to_string_pretty(content).expect("value serializes");
        std::fs::write(dir.join(document), text).expect("write dataset");
    }
}
