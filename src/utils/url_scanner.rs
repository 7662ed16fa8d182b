//! URL extraction from free-form text.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// `http(s)://` followed by anything up to whitespace or a closing bracket.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)https?://[^\s\]})>]+").expect("URL pattern is valid")
});

/// A URL occurrence inside a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatch<'t> {
    /// Byte range of the URL in the scanned text.
    pub span: Range<usize>,
    pub url: &'t str,
}

/// Yields every URL occurrence in `text`, in order of appearance.
///
/// The iterator is lazy and can be restarted by calling the function again.
/// Two identical URLs at different positions are two separate matches.
///
/// # Examples
///
/// ```ignore
/// let urls: Vec<_> = scan_urls("see https://a.com/x and (https://b.com/y)")
///     .map(|m| m.url)
///     .collect();
/// assert_eq!(urls, vec!["https://a.com/x", "https://b.com/y"]);
/// ```
pub fn scan_urls(text: &str) -> impl Iterator<Item = UrlMatch<'_>> {
    URL_PATTERN.find_iter(text).map(|m| UrlMatch {
        span: m.range(),
        url: m.as_str(),
    })
}

/// Replaces each span in `text` with its replacement.
///
/// Spans must be in ascending order and must not overlap. Text outside the
/// spans is copied unchanged.
pub fn replace_spans(text: &str, replacements: &[(Range<usize>, String)]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for (span, replacement) in replacements {
        out.push_str(&text[cursor..span.start]);
        out.push_str(replacement);
        cursor = span.end;
    }

    out.push_str(&text[cursor..]);
    out
}
