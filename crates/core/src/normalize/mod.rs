//! Title normalization pipeline.
//!
//! Turns a noisy directory-entry label such as
//! `Movie.Title.2023.1080p.BluRay.x264-GROUP` into:
//! - a readable title with release-metadata tokens removed ([`clean_title`])
//! - a URL-safe slug derived from that title ([`slugify`])
//! - the resolution and release type found in the raw label ([`classify`])
//!
//! [`enrich_record`] composes the three into a storable [`MovieRecord`].
//! Every function here is pure and never fails.
//!
//! [`MovieRecord`]: crate::dataset::MovieRecord

mod classify;
mod enrich;
mod slug;
mod title;

pub use classify::{classify, Attributes, RELEASE_TYPES, RESOLUTIONS, UNKNOWN};
pub use enrich::{enrich_dataset, enrich_record};
pub use slug::slugify;
pub use title::clean_title;
