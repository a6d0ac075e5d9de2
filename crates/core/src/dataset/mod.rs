//! Movie datasets - one year-keyed JSON document per category.
//!
//! Documents live in a single directory. A category is resolved to a
//! document by case-insensitive substring match on the file name, so
//! `english` selects `English-Movies.json`.

mod store;
mod types;

pub use store::JsonDirStore;
pub use types::*;

/// Trait for dataset document storage.
pub trait DatasetStore: Send + Sync {
    /// Names of all dataset documents, sorted by name.
    fn documents(&self) -> Result<Vec<String>, StoreError>;

    /// Load a document as normalized movie records.
    fn load(&self, document: &str) -> Result<Dataset<MovieRecord>, StoreError>;

    /// Load a document as scraper output (batch input).
    fn load_raw(&self, document: &str) -> Result<Dataset<RawRecord>, StoreError>;

    /// Replace a document's content.
    fn save(&self, document: &str, dataset: &Dataset<MovieRecord>) -> Result<(), StoreError>;

    /// First document whose name contains `category`, ignoring case.
    fn find_document(&self, category: &str) -> Result<Option<String>, StoreError> {
        let needle = category.to_lowercase();
        Ok(self
            .documents()?
            .into_iter()
            .find(|name| name.to_lowercase().contains(&needle)))
    }
}
