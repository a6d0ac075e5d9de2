use serde_json::Value;

use super::{classify, clean_title, slugify};
use crate::dataset::{Dataset, MovieRecord, RawRecord};

/// Fields computed by enrichment; stale copies in the input are dropped.
const DERIVED_FIELDS: [&str; 4] = ["url", "title", "resolution", "type"];

/// Normalize one scraped record.
///
/// `title` comes from the raw name, `url` from the title, and resolution and
/// type from the raw name (not the cleaned title). Other fields are kept,
/// including a `category` that is not a string.
pub fn enrich_record(raw: RawRecord) -> MovieRecord {
    let RawRecord {
        name,
        link,
        mut extra,
    } = raw;

    for field in DERIVED_FIELDS {
        extra.remove(field);
    }
    let category = match extra.remove("category") {
        Some(Value::String(category)) => Some(category),
        Some(other) => {
            extra.insert("category".to_string(), other);
            None
        }
        None => None,
    };

    let title = clean_title(&name);
    let url = slugify(&title);
    let attributes = classify(&name);

    MovieRecord {
        name,
        link,
        url,
        title,
        resolution: attributes.resolution,
        kind: attributes.kind,
        category,
        extra,
    }
}

/// Normalize every record of a dataset, keeping year buckets and order.
pub fn enrich_dataset(dataset: Dataset<RawRecord>) -> Dataset<MovieRecord> {
    dataset.map_records(enrich_record)
}
