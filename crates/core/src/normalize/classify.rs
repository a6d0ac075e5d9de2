use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder for a resolution or release type that could not be detected.
pub const UNKNOWN: &str = "Unknown";

/// Resolution tokens, in match priority order.
pub const RESOLUTIONS: [&str; 4] = ["720p", "1080p", "4K", "2160p"];

/// Release source tokens, in match priority order.
pub const RELEASE_TYPES: [&str; 15] = [
    "Blu-Ray",
    "BluRay",
    "WEBHDRip",
    "WEBRip",
    "WEB-Rip",
    "WEB-HD",
    "WEBHD-Rip",
    "DvDRip",
    "HDRip",
    "WebDL",
    "DVDrip",
    "WEB-DL",
    "SCam",
    "Full HD",
    "HD-TS",
];

static RESOLUTION_RE: Lazy<Regex> = Lazy::new(|| alternation(&RESOLUTIONS));
static RELEASE_TYPE_RE: Lazy<Regex> = Lazy::new(|| alternation(&RELEASE_TYPES));

fn alternation(tokens: &[&str]) -> Regex {
    Regex::new(&format!(r"(?i)\b({})\b", tokens.join("|"))).expect("valid token alternation")
}

/// Resolution and release type detected in a raw entry name.
///
/// Each value is the token exactly as written in the name (so `4k` stays
/// lower-case), or [`UNKNOWN`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub resolution: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Extract resolution and release type from a raw entry name.
///
/// Must be given the raw name: cleaning removes exactly the tokens this
/// looks for. When several tokens are present the leftmost match wins.
pub fn classify(name: &str) -> Attributes {
    Attributes {
        resolution: first_match(&RESOLUTION_RE, name),
        kind: first_match(&RELEASE_TYPE_RE, name),
    }
}

fn first_match(re: &Regex, name: &str) -> String {
    re.find(name)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}
