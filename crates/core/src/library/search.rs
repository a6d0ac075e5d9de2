//! Substring search across datasets.

use icu_collator::{Collator, CollatorOptions};
use std::cmp::Ordering;
use tracing::{debug, error, warn};

use super::{log_load_failure, record_lookup, MovieLibrary};
use crate::dataset::MovieRecord;

/// Category token that searches every dataset document.
pub const ALL_CATEGORIES: &str = "all";

impl MovieLibrary {
    /// Records whose title or raw name contains `query`, ignoring case,
    /// sorted by title.
    ///
    /// `category` selects one document by the usual substring rule, and
    /// within it the records whose `category` field equals the token
    /// (records without one belong to the document's category). The
    /// token `all` searches every document. An empty query matches
    /// everything.
    pub fn search(&self, category: &str, query: &str) -> Vec<MovieRecord> {
        let candidates = if category.eq_ignore_ascii_case(ALL_CATEGORIES) {
            self.all_records()
        } else {
            match self.load_category(category, "search") {
                Some(dataset) => dataset
                    .into_records()
                    .filter(|record| in_category(record, category))
                    .collect(),
                None => return Vec::new(),
            }
        };

        let needle = query.to_lowercase();
        let mut matched: Vec<MovieRecord> = candidates
            .into_iter()
            .filter(|record| matches_query(record, &needle))
            .collect();
        let collator = title_collator();
        matched.sort_by(|a, b| compare_titles(collator.as_ref(), &a.title, &b.title));

        if matched.is_empty() {
            warn!(category = %category, query = %query, "No movies matched search");
            record_lookup("search", "not_found");
        } else {
            debug!(category = %category, query = %query, count = matched.len(), "Search matched movies");
            record_lookup("search", "ok");
        }
        matched
    }

    /// Every record of every readable document, in document then year order.
    fn all_records(&self) -> Vec<MovieRecord> {
        let documents = match self.store.documents() {
            Ok(documents) => documents,
            Err(e) => {
                error!(error = %e, "Failed to list dataset documents");
                return Vec::new();
            }
        };

        let mut records = Vec::new();
        for document in documents {
            match self.store.load(&document) {
                Ok(dataset) => records.extend(dataset.into_records()),
                Err(e) => log_load_failure(&document, &e),
            }
        }
        records
    }
}

fn in_category(record: &MovieRecord, category: &str) -> bool {
    record
        .category
        .as_deref()
        .is_none_or(|c| c.to_lowercase() == category.to_lowercase())
}

fn matches_query(record: &MovieRecord, needle: &str) -> bool {
    record.title.to_lowercase().contains(needle) || record.name.to_lowercase().contains(needle)
}

/// Root-locale Unicode collation: accented letters sort with their base
/// letter and lowercase precedes uppercase among otherwise equal titles.
fn title_collator() -> Option<Collator> {
    match Collator::try_new(&Default::default(), CollatorOptions::new()) {
        Ok(collator) => Some(collator),
        Err(e) => {
            error!(error = ?e, "Failed to build title collator, sorting by code point");
            None
        }
    }
}

fn compare_titles(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
    match collator {
        Some(collator) => collator.compare(a, b),
        None => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| b.cmp(a)),
    }
}
