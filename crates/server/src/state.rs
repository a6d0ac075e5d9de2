use std::sync::Arc;
use filmdex_core::{Config, MovieLibrary};

/// Shared application state
pub struct AppState {
    config: Config,
    library: Arc<MovieLibrary>,
}

impl AppState {
    pub fn new(config: Config, library: Arc<MovieLibrary>) -> Self {
        Self { config, library }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn library(&self) -> &MovieLibrary {
        self.library.as_ref()
    }

    /// Owned handle to the library, for work moved off the async runtime.
    pub fn shared_library(&self) -> Arc<MovieLibrary> {
        Arc::clone(&self.library)
    }

    /// Listing page scraped by `/api/movielist`, if configured.
    pub fn source_url(&self) -> Option<&str> {
        self.config.listing.source_url.as_deref()
    }
}
