use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::classify::{RELEASE_TYPES, RESOLUTIONS};

/// Ordered removal rules. The list overlaps on purpose (bare and
/// dot-prefixed forms, resolutions twice); every rule is applied in order.
static REMOVAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let mut patterns = Vec::with_capacity(RESOLUTIONS.len() * 3 + RELEASE_TYPES.len() * 2 + 1);

    patterns.extend(RESOLUTIONS.iter().map(|t| token_pattern("", t)));
    patterns.extend(RELEASE_TYPES.iter().map(|t| token_pattern("", t)));
    patterns.extend(RESOLUTIONS.iter().map(|t| token_pattern(r"\.", t)));
    patterns.extend(RELEASE_TYPES.iter().map(|t| token_pattern(r"\.", t)));
    patterns.extend(RESOLUTIONS.iter().map(|t| token_pattern("", t)));
    patterns.push(Regex::new(r"\[\s*\]").expect("valid empty bracket pattern"));

    patterns
});

static BRACKETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[.*?\]").expect("valid bracket pattern"));

fn token_pattern(prefix: &str, token: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{}{}\b", prefix, token)).expect("valid token pattern")
}

/// Strip release-metadata tokens from a raw entry name.
///
/// Removes resolution and source tokens (case-insensitive, every
/// occurrence), empty `[]` pairs and any `[...]` annotation, then collapses
/// whitespace. The pass is repeated until the text stops changing, since a
/// removal can splice a new token together (`10[x]80p` → `1080p`); this
/// makes `clean_title(clean_title(n)) == clean_title(n)` hold for every input.
pub fn clean_title(name: &str) -> String {
    let mut current = clean_once(name);
    loop {
        let next = clean_once(&current);
        // Each effective pass shortens the text, so this terminates.
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_once(name: &str) -> String {
    let mut cleaned = name.to_string();

    for pattern in REMOVAL_PATTERNS.iter() {
        cleaned = pattern.replace_all(&cleaned, "").into_owned();
    }

    let cleaned = BRACKETED.replace_all(&cleaned, "");
    collapse_whitespace(&cleaned).trim().to_string()
}

/// Replace every run of two or more Unicode white space characters with a
/// single space. A lone whitespace character is kept as written.
fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_whitespace() {
            collapsed.push(c);
            continue;
        }
        let mut run = 1;
        while chars.next_if(|next| next.is_whitespace()).is_some() {
            run += 1;
        }
        collapsed.push(if run > 1 { ' ' } else { c });
    }
    collapsed
}
