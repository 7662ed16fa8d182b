//! Host name extraction from URLs found in message text.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Everything between `://` (minus a leading `www.`) and the first path,
/// query, fragment or whitespace character.
static HOST_FALLBACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)://(?:www\.)?([^/?#\s]+)").expect("host pattern is valid")
});

/// Extracts the lower-cased host name of `url`.
///
/// The URL is parsed structurally first. Text scraped out of chat messages is
/// often not a valid URL (stray unicode, unbalanced brackets), so a lenient
/// pattern is tried when parsing fails. A port, if present, is dropped.
///
/// Returns an empty string when neither approach finds a host; the
/// classifier treats that as an unknown domain.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(extract_domain("https://WWW.Flipkart.com/p/x?y=1"), "www.flipkart.com");
/// assert_eq!(extract_domain("not a url"), "");
/// ```
pub fn extract_domain(url: &str) -> String {
    if let Ok(parsed) = Url::parse(url)
        && let Some(host) = parsed.host_str()
    {
        return host.to_ascii_lowercase();
    }

    HOST_FALLBACK
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|host| {
            let host = host.as_str();
            // Strip a port without touching bracketed IPv6 literals.
            let host = match host.rsplit_once(':') {
                Some((name, port))
                    if !name.contains(']') && port.bytes().all(|b| b.is_ascii_digit()) =>
                {
                    name
                }
                _ => host,
            };
            host.to_lowercase()
        })
        .unwrap_or_default()
}
