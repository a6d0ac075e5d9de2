pub mod batch;
pub mod config;
pub mod dataset;
pub mod library;
pub mod listing;
pub mod metrics;
pub mod normalize;
pub mod testing;

pub use batch::{normalize_directory, BatchReport, SkippedDocument};
pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config,
    ConfigError, DatasetConfig, ListingConfig, ServerConfig,
};
pub use dataset::{
    strip_links, Dataset, DatasetStore, JsonDirStore, MovieRecord, PublicMovie, RawRecord,
    StoreError, Year,
};
pub use library::{LinkResolution, MovieLibrary, ResolvedMovie, ALL_CATEGORIES};
pub use listing::{
    base_url, join_file_link, parse_listing, resolve_link, EntryKind, HttpListingClient,
    ListingEntry, ListingError, ListingFetcher,
};
pub use normalize::{classify, clean_title, enrich_dataset, enrich_record, slugify, Attributes};
