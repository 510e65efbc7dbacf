use url::Url;

/// Canonicalizes a raw URL into its normalized form.
///
/// Normalization strips the query string and fragment while preserving
/// scheme, host, and path verbatim. This is the form stored as the visited
/// table key and carried through the frontier. Pure: on parse failure the
/// input is returned unchanged rather than propagating an error, since a
/// malformed discovered href should not abort the caller.
///
/// # Examples
///
/// ```
/// use tui_crawl::url::normalize;
///
/// assert_eq!(
///     normalize("https://example.co.nz/path?x=1#section"),
///     "https://example.co.nz/path"
/// );
/// ```
pub fn normalize(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) => {
            url.set_query(None);
            url.set_fragment(None);
            url.into()
        }
        Err(_) => raw.to_string(),
    }
}

/// Reduces a URL to the key used solely for dedup equality checks.
///
/// Lowercases the host, strips a single leading `www.`, drops the scheme,
/// and strips a trailing `/` from non-root paths (root becomes the empty
/// string). Pure: on parse failure the input is returned unchanged.
///
/// # Examples
///
/// ```
/// use tui_crawl::url::minimize;
///
/// assert_eq!(minimize("https://WWW.example.co.nz/path/"), "example.co.nz/path");
/// assert_eq!(minimize("http://example.co.nz/"), "example.co.nz");
/// ```
pub fn minimize(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => {
            let host = match url.host_str() {
                Some(h) => h.to_lowercase(),
                None => return raw.to_string(),
            };
            let host = host.strip_prefix("www.").unwrap_or(&host).to_string();

            let path = url.path();
            let path = if path == "/" {
                ""
            } else {
                path.strip_suffix('/').unwrap_or(path)
            };

            format!("{host}{path}")
        }
        Err(_) => raw.to_string(),
    }
}
