//! Detail lookup with direct-link resolution.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::{record_lookup, MovieLibrary};
use crate::dataset::{MovieRecord, Year};
use crate::listing::{base_url, join_file_link, EntryKind};
use crate::metrics;

/// Whether a detail record's `link` points at a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkResolution {
    /// `link` was rewritten to the first file in the record's directory.
    Resolved,
    /// The directory listing had no file entries or could not be fetched;
    /// `link` is still the directory link from the dataset.
    Unresolved,
}

impl LinkResolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkResolution::Resolved => "resolved",
            LinkResolution::Unresolved => "unresolved",
        }
    }
}

/// A record returned by a detail lookup.
#[derive(Debug, Clone)]
pub struct ResolvedMovie {
    pub record: MovieRecord,
    pub link: LinkResolution,
}

impl MovieLibrary {
    /// The record under `year` whose slug equals `slug` (ignoring case),
    /// with its directory link replaced by a direct file link.
    ///
    /// Runs [`find_movie`](Self::find_movie) and then
    /// [`resolve_direct_link`](Self::resolve_direct_link).
    pub async fn resolve_detail(
        &self,
        category: &str,
        year: Year,
        slug: &str,
    ) -> Option<ResolvedMovie> {
        let record = self.find_movie(category, year, slug)?;
        Some(self.resolve_direct_link(record).await)
    }

    /// The stored record under `year` whose slug equals `slug`, ignoring
    /// case. Reads the dataset document synchronously.
    pub fn find_movie(&self, category: &str, year: Year, slug: &str) -> Option<MovieRecord> {
        let Some(dataset) = self.load_category(category, "detail") else {
            count_resolution("not_found");
            return None;
        };

        let wanted = slug.to_lowercase();
        let Some(record) = dataset
            .year(year)
            .iter()
            .find(|record| record.url.to_lowercase() == wanted)
            .cloned()
        else {
            warn!(category = %category, year, slug = %slug, "No movie matches slug");
            record_lookup("detail", "not_found");
            count_resolution("not_found");
            return None;
        };
        record_lookup("detail", "ok");
        Some(record)
    }

    /// Swap the record's directory link for its first file.
    ///
    /// The record's `link` is fetched as a directory listing and the first
    /// file entry is joined onto the link's scheme and host. When that
    /// yields nothing the record comes back with its directory link and
    /// [`LinkResolution::Unresolved`].
    pub async fn resolve_direct_link(&self, mut record: MovieRecord) -> ResolvedMovie {
        let link = match self.first_file_link(&record.link).await {
            Some(direct) => {
                debug!(slug = %record.url, from = %record.link, to = %direct, "Resolved direct link");
                record.link = direct;
                LinkResolution::Resolved
            }
            None => {
                info!(slug = %record.url, link = %record.link, "Keeping directory link");
                LinkResolution::Unresolved
            }
        };
        count_resolution(link.as_str());

        ResolvedMovie { record, link }
    }

    async fn first_file_link(&self, directory: &str) -> Option<String> {
        let files = match self.listing.list(directory, EntryKind::File).await {
            Ok(files) => files,
            Err(e) => {
                warn!(link = %directory, error = %e, "Failed to fetch movie directory");
                return None;
            }
        };

        let first = files.into_iter().next()?;
        let Some(base) = base_url(directory) else {
            warn!(link = %directory, "Movie link is not an absolute URL");
            return None;
        };
        Some(join_file_link(&base, &first.link))
    }
}

fn count_resolution(outcome: &str) {
    metrics::DETAIL_RESOLUTIONS.with_label_values(&[outcome]).inc();
}
