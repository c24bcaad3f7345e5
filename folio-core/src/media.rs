//! Link and media helpers
//!
//!     Small pure helpers over feed strings: the link scheme allow-list shared with the
//!     markdown renderer, YouTube id extraction for video thumbnails and the date label.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

const SAFE_SCHEMES: [&str; 3] = ["http://", "https://", "mailto:"];

static YOUTUBE_HOST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(^https?://)?(www\.)?(youtube\.com|youtu\.be)/").expect("valid regex")
});

/// Id patterns for strings that don't parse as absolute URLs, tried in order.
static YOUTUBE_ID_FALLBACKS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)youtu\.be/([A-Za-z0-9_-]{6,})",
        r"(?i)[?&]v=([A-Za-z0-9_-]{6,})",
        r"(?i)/embed/([A-Za-z0-9_-]{6,})",
        r"(?i)/shorts/([A-Za-z0-9_-]{6,})",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
    .collect()
});

/// Returns the trimmed URL when its scheme is http, https or mailto (case-insensitive).
pub fn safe_href(url: &str) -> Option<String> {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    SAFE_SCHEMES
        .iter()
        .any(|scheme| lower.starts_with(scheme))
        .then(|| url.to_string())
}

pub fn is_youtube_url(url: &str) -> bool {
    YOUTUBE_HOST.is_match(url)
}

/// Extracts the video id from youtu.be, watch, embed and shorts URLs.
pub fn youtube_id(url: &str) -> Option<String> {
    let id = match Url::parse(url) {
        Ok(parsed) => id_from_parsed(&parsed),
        Err(_) => YOUTUBE_ID_FALLBACKS
            .iter()
            .find_map(|pattern| pattern.captures(url))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string()),
    };
    id.filter(|id| !id.is_empty())
}

fn id_from_parsed(url: &Url) -> Option<String> {
    let segments: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    if url.host_str().is_some_and(|host| host.contains("youtu.be")) {
        return segments.first().map(|s| s.to_string());
    }
    if let Some((_, v)) = url.query_pairs().find(|(key, _)| key == "v") {
        if !v.is_empty() {
            return Some(v.into_owned());
        }
    }
    ["embed", "shorts"].iter().find_map(|marker| {
        let at = segments.iter().position(|s| s == marker)?;
        segments.get(at + 1).map(|s| s.to_string())
    })
}

/// `hqdefault` thumbnail for a YouTube URL.
pub fn youtube_thumb(url: &str) -> Option<String> {
    youtube_id(url).map(|id| format!("https://img.youtube.com/vi/{id}/hqdefault.jpg"))
}

/// Date label for a role or project.
///
/// A start date with an end (or an ongoing flag) renders as a range; a lone date renders
/// as itself; an ongoing item with no dates renders as `Present`.
pub fn format_dates(start: &str, end: &str, is_current: bool) -> String {
    let (start, end) = (start.trim(), end.trim());
    match (start.is_empty(), end.is_empty(), is_current) {
        (true, true, false) => String::new(),
        (false, _, true) => format!("{start} — Present"),
        (false, false, false) => format!("{start} — {end}"),
        (false, true, false) => start.to_string(),
        (true, false, _) => end.to_string(),
        (true, true, true) => "Present".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://x.com", Some("https://x.com"))]
    #[case("  HTTP://X.COM/a ", Some("HTTP://X.COM/a"))]
    #[case("mailto:me@x.com", Some("mailto:me@x.com"))]
    #[case("javascript:alert(1)", None)]
    #[case("//x.com", None)]
    #[case("ftp://x.com", None)]
    #[case("", None)]
    fn test_safe_href(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(safe_href(input).as_deref(), expected);
    }

    #[rstest]
    #[case("https://youtu.be/dQw4w9WgXcQ", Some("dQw4w9WgXcQ"))]
    #[case("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=4", Some("dQw4w9WgXcQ"))]
    #[case("https://www.youtube.com/embed/dQw4w9WgXcQ", Some("dQw4w9WgXcQ"))]
    #[case("https://youtube.com/shorts/abcdef1", Some("abcdef1"))]
    #[case("youtu.be/dQw4w9WgXcQ", Some("dQw4w9WgXcQ"))]
    #[case("https://www.youtube.com/", None)]
    #[case("https://vimeo.com/12345", None)]
    fn test_youtube_id(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(youtube_id(input).as_deref(), expected);
    }

    #[test]
    fn test_is_youtube_url() {
        assert!(is_youtube_url("https://www.youtube.com/watch?v=x"));
        assert!(is_youtube_url("youtu.be/abc"));
        assert!(!is_youtube_url("https://vimeo.com/1"));
    }

    #[rstest]
    #[case("", "", false, "")]
    #[case("2019", "2021", false, "2019 — 2021")]
    #[case("2019", "2021", true, "2019 — Present")]
    #[case("2019", "", true, "2019 — Present")]
    #[case("2019", "", false, "2019")]
    #[case("", "2021", false, "2021")]
    #[case("", "2021", true, "2021")]
    #[case("", "", true, "Present")]
    fn test_format_dates(
        #[case] start: &str,
        #[case] end: &str,
        #[case] current: bool,
        #[case] expected: &str,
    ) {
        assert_eq!(format_dates(start, end, current), expected);
    }
}
