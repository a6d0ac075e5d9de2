//! Offline normalization of a dataset directory.
//!
//! Rewrites every document in place with derived fields recomputed from
//! each record's raw name. Enrichment is a pure function of the name, so
//! running the pass again over its own output changes nothing.

use serde::Serialize;
use tracing::{error, info};

use crate::dataset::{DatasetStore, StoreError};
use crate::normalize::enrich_dataset;

/// A document the batch pass could not rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDocument {
    pub document: String,
    pub reason: String,
}

/// Outcome of a batch pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Documents rewritten.
    pub processed: Vec<String>,
    /// Documents left untouched.
    pub skipped: Vec<SkippedDocument>,
    /// Records enriched across all processed documents.
    pub records: usize,
}

/// Enrich every record of every document in `store` and write it back.
///
/// Fails only if the documents cannot be enumerated. A document that
/// cannot be read, parsed or written is logged, reported in
/// [`BatchReport::skipped`], and the pass moves on.
pub fn normalize_directory(store: &dyn DatasetStore) -> Result<BatchReport, StoreError> {
    let mut report = BatchReport::default();

    for document in store.documents()? {
        match normalize_document(store, &document) {
            Ok(count) => {
                info!(document = %document, records = count, "Normalized dataset");
                report.records += count;
                report.processed.push(document);
            }
            Err(e) => {
                error!(document = %document, error = %e, "Skipping dataset");
                report.skipped.push(SkippedDocument {
                    document,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

fn normalize_document(store: &dyn DatasetStore, document: &str) -> Result<usize, StoreError> {
    let enriched = enrich_dataset(store.load_raw(document)?);
    store.save(document, &enriched)?;
    Ok(enriched.record_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::JsonDirStore;
    use serde_json::{json, Value};
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    fn read_json(dir: &TempDir, name: &str) -> Value {
        serde_json::from_str(&fs::read_to_string(dir.path().join(name)).unwrap()).unwrap()
    }

    fn scraped_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let doc = json!({
            "2023": [
                { "name": "Movie.Title.2023.1080p.BluRay.x264-GROUP", "link": "http://h/a/" },
                { "name": "Some Movie [2021] [WEBRip]", "link": "http://h/b/", "poster": "b.jpg" },
            ],
            "2021": [
                { "name": "Plain Name", "link": "http://h/c/" },
            ],
        });
        write(&dir, "English-Movies.json", &doc.to_string());
        dir
    }

    #[test]
    fn test_normalize_enriches_every_record() {
        let dir = scraped_dir();
        let store = JsonDirStore::new(dir.path());

        let report = normalize_directory(&store).unwrap();
        assert_eq!(report.processed, vec!["English-Movies.json"]);
        assert!(report.skipped.is_empty());
        assert_eq!(report.records, 3);

        let doc = read_json(&dir, "English-Movies.json");
        let first = &doc["2023"][0];
        assert_eq!(first["title"], "Movie.Title.2023...x264-GROUP");
        assert_eq!(first["resolution"], "1080p");
        assert_eq!(first["type"], "BluRay");
        assert_eq!(first["link"], "http://h/a/");

        let second = &doc["2023"][1];
        assert_eq!(second["title"], "Some Movie");
        assert_eq!(second["url"], "some-movie");
        assert_eq!(second["type"], "WEBRip");
        assert_eq!(second["poster"], "b.jpg");

        let plain = &doc["2021"][0];
        assert_eq!(plain["resolution"], "Unknown");
        assert_eq!(plain["type"], "Unknown");
    }

    #[test]
    fn test_normalize_is_idempotent_on_disk() {
        let dir = scraped_dir();
        let store = JsonDirStore::new(dir.path());
        let path = dir.path().join("English-Movies.json");

        normalize_directory(&store).unwrap();
        let first = fs::read(&path).unwrap();
        normalize_directory(&store).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_normalize_keeps_non_string_category_across_runs() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "Mixed.json",
            &json!({
                "2020": [{ "name": "Heat", "link": "http://h/x/", "category": 7 }],
            })
            .to_string(),
        );
        let store = JsonDirStore::new(dir.path());

        normalize_directory(&store).unwrap();
        normalize_directory(&store).unwrap();

        let doc = read_json(&dir, "Mixed.json");
        assert_eq!(doc["2020"][0]["category"], 7);
        assert_eq!(doc["2020"][0]["url"], "heat");
    }

    #[test]
    fn test_normalize_writes_two_space_indent() {
        let dir = scraped_dir();
        normalize_directory(&JsonDirStore::new(dir.path())).unwrap();

        let text = fs::read_to_string(dir.path().join("English-Movies.json")).unwrap();
        assert!(text.starts_with("{\n  \"2021\": [\n    {"));
    }

    #[test]
    fn test_normalize_skips_malformed_and_continues() {
        let dir = scraped_dir();
        write(&dir, "Broken.json", "{ \"2023\": [ {\"name\": 1} ] }");
        write(&dir, "Garbage.json", "<html>");
        write(&dir, "notes.txt", "ignored");
        let store = JsonDirStore::new(dir.path());

        let report = normalize_directory(&store).unwrap();
        assert_eq!(report.processed, vec!["English-Movies.json"]);
        let skipped: Vec<_> = report.skipped.iter().map(|s| s.document.as_str()).collect();
        assert_eq!(skipped, vec!["Broken.json", "Garbage.json"]);

        assert_eq!(
            fs::read_to_string(dir.path().join("Garbage.json")).unwrap(),
            "<html>"
        );
    }

    #[test]
    fn test_normalize_missing_directory_fails() {
        let store = JsonDirStore::new("/nonexistent/filmdex/batch");
        assert!(normalize_directory(&store).is_err());
    }
}
