//! Types for the per-category movie datasets.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Release year used as the dataset partition key.
pub type Year = i32;

/// One category's records, partitioned by year.
///
/// Serialized as the year-keyed JSON object stored on disk
/// (`{"2023": [...], "2024": [...]}`). Years are kept in ascending order and
/// record order inside a year is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset<R> {
    years: BTreeMap<Year, Vec<R>>,
}

impl<R> Default for Dataset<R> {
    fn default() -> Self {
        Self {
            years: BTreeMap::new(),
        }
    }
}

impl<R> Dataset<R> {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records for one year; empty when the year is absent.
    pub fn year(&self, year: Year) -> &[R] {
        self.years.get(&year).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append records to a year bucket.
    pub fn extend_year(&mut self, year: Year, records: impl IntoIterator<Item = R>) {
        self.years.entry(year).or_default().extend(records);
    }

    /// Iterate year buckets in ascending year order.
    pub fn years(&self) -> impl Iterator<Item = (Year, &[R])> {
        self.years.iter().map(|(year, records)| (*year, records.as_slice()))
    }

    /// Total number of records across all years.
    pub fn record_count(&self) -> usize {
        self.years.values().map(Vec::len).sum()
    }

    /// Consume the dataset, yielding every record in year order.
    pub fn into_records(self) -> impl Iterator<Item = R> {
        self.years.into_values().flatten()
    }

    /// Transform every record, keeping year buckets and order.
    pub fn map_records<S>(self, mut f: impl FnMut(R) -> S) -> Dataset<S> {
        Dataset {
            years: self
                .years
                .into_iter()
                .map(|(year, records)| (year, records.into_iter().map(&mut f).collect()))
                .collect(),
        }
    }
}

/// A directory entry as produced by the scraper, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Entry label, usually with release metadata in it.
    pub name: String,
    /// Absolute URL of the entry's listing page.
    pub link: String,
    /// Any other fields present in the document.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A normalized movie entry as stored in a dataset document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Original entry label (kept for search).
    pub name: String,
    /// Listing page URL. Internal: never exposed by list or search.
    pub link: String,
    /// Slug derived from `title`.
    pub url: String,
    /// `name` with release-metadata tokens removed.
    pub title: String,
    /// Resolution token or "Unknown".
    pub resolution: String,
    /// Release type token or "Unknown".
    #[serde(rename = "type")]
    pub kind: String,
    /// Category the record belongs to, when known. A stored `category`
    /// that is not a string reads as `None`.
    #[serde(
        default,
        deserialize_with = "category_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    /// Any other fields present in the document.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn category_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(category) => Some(category),
        _ => None,
    })
}

/// A movie as returned to API callers: a [`MovieRecord`] without `link`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicMovie {
    pub name: String,
    pub url: String,
    pub title: String,
    pub resolution: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<MovieRecord> for PublicMovie {
    fn from(record: MovieRecord) -> Self {
        Self {
            name: record.name,
            url: record.url,
            title: record.title,
            resolution: record.resolution,
            kind: record.kind,
            category: record.category,
            extra: record.extra,
        }
    }
}

/// Drop the internal `link` from every record.
pub fn strip_links(records: Vec<MovieRecord>) -> Vec<PublicMovie> {
    records.into_iter().map(PublicMovie::from).collect()
}

/// Errors for dataset storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset {document}: {reason}")]
    Malformed { document: String, reason: String },

    #[error("Dataset not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn movie(name: &str) -> MovieRecord {
        MovieRecord {
            name: name.to_string(),
            link: format!("http://files.example.net/Movies/{}/", name),
            url: name.to_lowercase(),
            title: name.to_string(),
            resolution: "Unknown".to_string(),
            kind: "Unknown".to_string(),
            category: None,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_dataset_deserialize_year_keys() {
        let doc = json!({
            "2024": [{"name": "B", "link": "http://h/b/"}],
            "2023": [{"name": "A", "link": "http://h/a/"}]
        });
        let dataset: Dataset<RawRecord> = serde_json::from_value(doc).unwrap();

        let years: Vec<Year> = dataset.years().map(|(y, _)| y).collect();
        assert_eq!(years, vec![2023, 2024]);
        assert_eq!(dataset.year(2023)[0].name, "A");
        assert_eq!(dataset.record_count(), 2);
    }

    #[test]
    fn test_dataset_absent_year_is_empty() {
        let dataset: Dataset<RawRecord> = Dataset::new();
        assert!(dataset.year(1999).is_empty());
    }

    #[test]
    fn test_dataset_rejects_non_object() {
        let result: Result<Dataset<RawRecord>, _> = serde_json::from_value(json!([1, 2, 3]));
        assert!(result.is_err());

        let result: Result<Dataset<RawRecord>, _> =
            serde_json::from_value(json!({"not-a-year": []}));
        assert!(result.is_err());
    }

    #[test]
    fn test_dataset_serializes_string_year_keys() {
        let mut dataset = Dataset::new();
        dataset.extend_year(2022, vec![movie("Heat")]);
        let value = serde_json::to_value(&dataset).unwrap();
        assert_eq!(value["2022"][0]["name"], "Heat");
    }

    #[test]
    fn test_map_records_preserves_order() {
        let mut dataset = Dataset::new();
        dataset.extend_year(2021, vec![3, 1, 2]);
        dataset.extend_year(2020, vec![9]);
        let doubled = dataset.map_records(|n| n * 2);
        assert_eq!(doubled.year(2021), &[6, 2, 4]);
        assert_eq!(doubled.year(2020), &[18]);
    }

    #[test]
    fn test_raw_record_keeps_extra_fields() {
        let raw: RawRecord = serde_json::from_value(json!({
            "name": "X",
            "link": "http://h/x/",
            "category": "English",
            "size": 42
        }))
        .unwrap();
        assert_eq!(raw.extra["category"], "English");
        assert_eq!(raw.extra["size"], 42);
    }

    #[test]
    fn test_movie_record_type_field() {
        let mut record = movie("Heat");
        record.kind = "BluRay".to_string();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "BluRay");
        assert!(value.get("kind").is_none());
        assert!(value.get("category").is_none());
    }

    #[test]
    fn test_public_movie_has_no_link() {
        let mut record = movie("Heat");
        record.category = Some("english".to_string());
        record.extra.insert("size".to_string(), json!(7));

        let public = strip_links(vec![record]);
        let value = serde_json::to_value(&public[0]).unwrap();
        assert!(value.get("link").is_none());
        assert_eq!(value["name"], "Heat");
        assert_eq!(value["category"], "english");
        assert_eq!(value["size"], 7);
    }
}
