//! Filesystem implementation of the dataset store.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{Dataset, DatasetStore, MovieRecord, RawRecord, StoreError};

const DOCUMENT_EXTENSION: &str = ".json";

/// Dataset documents stored as `*.json` files in one directory.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// Create a store over `dir`. The directory is not touched until used.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the documents.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, document: &str) -> PathBuf {
        self.dir.join(document)
    }

    fn read<T: DeserializeOwned>(&self, document: &str) -> Result<T, StoreError> {
        let path = self.path_of(document);
        let content = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(document.to_string())
            } else {
                StoreError::Io {
                    path: path.display().to_string(),
                    source: e,
                }
            }
        })?;

        serde_json::from_str(&content).map_err(|e| StoreError::Malformed {
            document: document.to_string(),
            reason: e.to_string(),
        })
    }
}

impl DatasetStore for JsonDirStore {
    fn documents(&self) -> Result<Vec<String>, StoreError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| StoreError::Io {
            path: self.dir.display().to_string(),
            source: e,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::Io {
                path: self.dir.display().to_string(),
                source: e,
            })?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            // Non UTF-8 names cannot be matched against a category anyway.
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(DOCUMENT_EXTENSION) {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        debug!(dir = %self.dir.display(), documents = names.len(), "Listed dataset documents");
        Ok(names)
    }

    fn load(&self, document: &str) -> Result<Dataset<MovieRecord>, StoreError> {
        self.read(document)
    }

    fn load_raw(&self, document: &str) -> Result<Dataset<RawRecord>, StoreError> {
        self.read(document)
    }

    fn save(&self, document: &str, dataset: &Dataset<MovieRecord>) -> Result<(), StoreError> {
        let path = self.path_of(document);
        let content = serde_json::to_string_pretty(dataset).map_err(|e| StoreError::Malformed {
            document: document.to_string(),
            reason: e.to_string(),
        })?;

        fs::write(&path, content).map_err(|e| StoreError::Io {
            path: path.display().to_string(),
            source: e,
        })
    }
}
