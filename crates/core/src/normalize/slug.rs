use once_cell::sync::Lazy;
use regex_lite::Regex;

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").expect("valid slug pattern"));
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid slug pattern"));
static HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("valid slug pattern"));

/// Convert a title into a URL-safe slug.
///
/// Lower-cases, drops everything outside `[a-z0-9]`, whitespace and `-`,
/// turns whitespace runs into a single hyphen and squeezes repeated hyphens.
/// Whitespace is any Unicode white space, so `U+00A0` separates words.
/// The result is percent-encoded for use as a path segment.
///
/// Distinct titles may produce the same slug ("Alien" and "Alien!" both
/// become `alien`); no disambiguation is applied.
pub fn slugify(title: &str) -> String {
    let lowered: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    let stripped = DISALLOWED.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RUN.replace_all(stripped.trim(), "-");
    let squeezed = HYPHEN_RUN.replace_all(&hyphenated, "-");

    urlencoding::encode(&squeezed).into_owned()
}
