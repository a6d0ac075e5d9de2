use reqwest::Url;

/// `scheme://host[:port]` of an absolute URL, or `None` if it doesn't parse.
///
/// Default ports are omitted, as browsers do.
pub fn base_url(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    let host = url.host_str()?;

    Some(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}

/// Build a direct link from a server base and a listing `href`.
///
/// Relative hrefs are appended to `base` with exactly one `/` in between;
/// hrefs that are already absolute http(s) URLs are returned unchanged.
pub fn join_file_link(base: &str, href: &str) -> String {
    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        return href.to_string();
    }

    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        href.trim_start_matches('/')
    )
}

/// Resolve `href` against the page it was found on, as a browser would.
///
/// Falls back to `href` unchanged when `page` is not an absolute URL.
pub fn resolve_link(page: &str, href: &str) -> String {
    Url::parse(page)
        .and_then(|base| base.join(href))
        .map(String::from)
        .unwrap_or_else(|_| href.to_string())
}
