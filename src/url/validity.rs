use url::Url;

/// Path suffixes (case-insensitive) that disqualify an otherwise well-formed
/// URL from ever entering the frontier. Mirrors the non-HTML asset classes a
/// crawler has no use fetching: images, archives, media, scripts, binaries,
/// style/font assets, and server-side script extensions.
pub const BLACKLISTED_SUFFIXES: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".pdf", ".doc", ".docx", ".xls", ".xlsx",
    ".ppt", ".txt", ".zip", ".rar", ".tar", ".gz", ".7z", ".bz2", ".mp3", ".wav", ".ogg", ".aac",
    ".flac", ".mp4", ".avi", ".mov", ".mkv", ".webm", ".exe", ".bin", ".dll", ".msi", ".sh",
    ".iso", ".css", ".js", ".json", ".xml", ".rss", ".ico", ".ttf", ".woff", ".woff2", ".eot",
    ".swf", ".flv", ".fla", ".php", ".aspx", ".cgi", ".py", ".pl", ".rb", ".jsp", ".dat", ".log",
    ".bak",
];

/// Labels preceding a ccTLD that are treated as recognizable second-level
/// categories, given a more generous scoring curve than an unrecognized one.
pub const SECOND_LABEL_WHITELIST: &[&str] = &[
    "govt", "org", "ac", "co", "cri", "health", "com", "net", "edu", "mil", "info", "biz", "int",
    "ai", "io", "tech", "xyz",
];

/// Reports whether a URL may ever enter the frontier: its host must end with
/// the configured target TLD suffix, and its path must not end with a
/// blacklisted suffix.
pub fn is_valid(url: &Url, tld_suffix: &str) -> bool {
    let host = match url.host_str() {
        Some(h) => h.to_lowercase(),
        None => return false,
    };

    if !host.ends_with(tld_suffix) {
        return false;
    }

    let path = url.path().to_lowercase();
    !BLACKLISTED_SUFFIXES.iter().any(|suffix| path.ends_with(suffix))
}

/// Extracts the DNS label immediately preceding the target TLD suffix, e.g.
/// `co` from `example.co.nz` given a suffix of `.nz`. Returns `None` if the
/// host does not end with the suffix.
pub fn second_label(host: &str, tld_suffix: &str) -> Option<String> {
    let host = host.to_lowercase();
    let remainder = host.strip_suffix(tld_suffix)?;
    let remainder = remainder.trim_end_matches('.');
    remainder.rsplit('.').next().map(|s| s.to_string())
}

/// Whether a given second-label value is in the recognized whitelist.
pub fn is_whitelisted_second_label(label: &str) -> bool {
    SECOND_LABEL_WHITELIST.contains(&label)
}
