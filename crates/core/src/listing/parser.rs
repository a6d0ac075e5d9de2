//! HTML table parsing for directory-listing pages.

use once_cell::sync::Lazy;
use regex_lite::{Captures, Regex};

use super::{EntryKind, ListingEntry};

static ROW_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<tr\b").expect("valid regex"));

static ICON_CELL: Lazy<Regex> = Lazy::new(|| cell_pattern("fb-i"));

static NAME_CELL: Lazy<Regex> = Lazy::new(|| cell_pattern("fb-n"));

static IMG_ALT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<img\b[^>]*?\salt\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex")
});

static ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<a\b([^>]*)>(.*?)</a\s*>").expect("valid regex"));

static HREF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)(?:^|\s)href\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex")
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));

static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("valid regex")
});

fn cell_pattern(class: &str) -> Regex {
    Regex::new(&format!(
        r#"(?is)<td\b[^>]*?\sclass\s*=\s*["'](?:[^"']*\s)?{class}(?:\s[^"']*)?["'][^>]*>(.*?)(?:</td\s*>|$)"#
    ))
    .expect("valid regex")
}

/// Extract the entries of `kind` from a listing page, in page order.
///
/// A row qualifies when its icon cell holds an image whose `alt` is exactly
/// the kind's marker (`folder` or `file`). The entry's name is the trimmed
/// text of the name cell's anchor and its link the anchor's `href`. Rows
/// without an anchor are skipped. Malformed markup never fails, it just
/// yields fewer entries.
pub fn parse_listing(html: &str, kind: EntryKind) -> Vec<ListingEntry> {
    let starts: Vec<usize> = ROW_START.find_iter(html).map(|m| m.start()).collect();

    starts
        .iter()
        .enumerate()
        .filter_map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(html.len());
            parse_row(&html[start..end], kind)
        })
        .collect()
}

fn parse_row(row: &str, kind: EntryKind) -> Option<ListingEntry> {
    let icon = ICON_CELL.captures(row)?.get(1)?.as_str();
    let alt = IMG_ALT.captures(icon).and_then(|c| either(&c))?;
    if decode_entities(alt) != kind.alt_text() {
        return None;
    }

    let cell = NAME_CELL.captures(row)?.get(1)?.as_str();
    let anchor = ANCHOR.captures(cell)?;
    let attrs = anchor.get(1).map_or("", |m| m.as_str());
    let href = HREF.captures(attrs).and_then(|c| either(&c))?;
    let text = anchor.get(2).map_or("", |m| m.as_str());

    Some(ListingEntry {
        name: decode_entities(&TAG.replace_all(text, ""))
            .trim()
            .to_string(),
        link: decode_entities(href),
    })
}

/// First of the two alternative quote-style capture groups that matched.
fn either<'h>(caps: &Captures<'h>) -> Option<&'h str> {
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

/// Decode the HTML character references that appear in listing pages.
///
/// Unknown named references are left as written.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    ENTITY
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            let decoded = if let Some(hex) = body.strip_prefix("#x").or(body.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match body {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    _ => None,
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}
