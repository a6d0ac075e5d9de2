//! Remote directory listings.
//!
//! File servers publish each directory as an HTML table in which every row
//! carries an icon (`<img alt="folder">` or `<img alt="file">`) in a
//! `td.fb-i` cell and the entry's anchor in a `td.fb-n` cell.
//! This module fetches such pages and extracts `{name, link}` entries.

mod http;
mod parser;
mod types;
mod url;

pub use http::HttpListingClient;
pub use parser::parse_listing;
pub use types::*;
pub use url::{base_url, join_file_link, resolve_link};
