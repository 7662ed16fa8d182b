//! Query string edits applied to affiliate links.
//!
//! These work on the URL text rather than a parsed [`url::Url`]: links copied
//! out of messages are frequently not strictly valid, and the rewritten link
//! should differ from the original only where a parameter was added or removed.

use regex::Regex;
use std::sync::LazyLock;

/// Tracking and attribution parameters removed from full marketplace links.
pub const TRACKING_PARAMS: &[&str] = &[
    "tag", "ref", "linkCode", "camp", "creative", "ascsubtag", "keywords", "qid", "sprefix", "sr",
    "_encoding", "psc", "refRID", "th", "smid", "linkId", "ref_", "adgrpid", "hvadid", "hvpos",
    "hvnetw", "hvrand", "hvpone", "hvptwo", "hvqmt", "hvdev", "hvdvcmdl", "hvlocint", "hvlocphy",
    "hvtargid", "pf_rd_p", "pf_rd_r", "pd_rd_wg", "pd_rd_r", "pd_rd_w", "pf_rd_i", "pf_rd_m",
    "pf_rd_s", "pf_rd_t", "pd_rd_i", "ie", "nodeId", "store-ref", "dchild", "crid", "language",
    "rnid", "rh", "sort", "low-price", "high-price", "review-rank", "avg-customer-review",
];

static TRACKING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let names = TRACKING_PARAMS
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)[?&](?:{names})=[^&]*")).expect("tracking pattern is valid")
});

static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]{2,}").expect("separator pattern is valid"));

/// Splits `url` into the part before the query, the query (with its leading
/// `?`) and the fragment (with its `#`).
fn split_query(url: &str) -> (&str, &str, &str) {
    let (rest, fragment) = match url.find('#') {
        Some(pos) => url.split_at(pos),
        None => (url, ""),
    };
    let (path, query) = match rest.find('?') {
        Some(pos) => rest.split_at(pos),
        None => (rest, ""),
    };
    (path, query, fragment)
}

/// Removes every [`TRACKING_PARAMS`] entry from the query of `url`, ignoring
/// case, and repairs the separators left behind.
///
/// Only whole `name=value` pairs are removed, so a parameter whose name merely
/// ends with a tracked name is kept. The path and fragment are never edited.
pub fn strip_tracking_params(url: &str) -> String {
    let (path, query, fragment) = split_query(url);
    let query = TRACKING_PATTERN.replace_all(query, "");

    format!("{path}{}{fragment}", tidy_query(&query))
}

/// Normalizes what is left of a query string after removals.
///
/// Drops trailing separators, collapses runs into one `&` and makes sure a
/// non-empty query starts with `?`.
fn tidy_query(query: &str) -> String {
    let query = query.trim_end_matches(['?', '&']);
    let query = SEPARATOR_RUNS.replace_all(query, "&");
    let pairs = query.trim_start_matches(['?', '&']);

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{pairs}")
    }
}

/// Appends `pairs` (already `key=value` formatted) to the query of `url`.
///
/// Uses `?` when the URL has no query yet and `&` otherwise. A fragment stays
/// at the end.
pub fn append_query(url: &str, pairs: &str) -> String {
    let (base, fragment) = match url.find('#') {
        Some(pos) => url.split_at(pos),
        None => (url, ""),
    };
    let separator = if base.contains('?') { '&' } else { '?' };

    format!("{base}{separator}{pairs}{fragment}")
}

/// Returns true if `url` carries `name=value` anywhere in its text.
pub fn has_param(url: &str, name: &str, value: &str) -> bool {
    url.contains(&format!("{name}={value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_removes_listed_params() {
        let url = "https://www.amazon.in/dp/B000ABCDEF?ref=xyz&psc=1";
        assert_eq!(
            strip_tracking_params(url),
            "https://www.amazon.in/dp/B000ABCDEF"
        );
    }

    #[test]
    fn test_strip_keeps_unlisted_params() {
        let url = "https://www.amazon.in/s?k=phone&ref=sr_pg_1&page=2";
        assert_eq!(
            strip_tracking_params(url),
            "https://www.amazon.in/s?k=phone&page=2"
        );
    }

    #[test]
    fn test_strip_is_case_insensitive() {
        let url = "https://amazon.com/dp/X?TAG=other-20&Th=1&color=red";
        assert_eq!(strip_tracking_params(url), "https://amazon.com/dp/X?color=red");
    }

    #[test]
    fn test_strip_requires_whole_name() {
        // `subtag` and `piece` are not tracked even though they end in listed names.
        let url = "https://amazon.in/dp/X?subtag=a&piece=b";
        assert_eq!(strip_tracking_params(url), url);
    }

    #[test]
    fn test_strip_stops_at_fragment() {
        let url = "https://amazon.in/dp/X?psc=1#reviews";
        assert_eq!(strip_tracking_params(url), "https://amazon.in/dp/X#reviews");
    }

    #[test]
    fn test_tidy_query() {
        assert_eq!(tidy_query("?"), "");
        assert_eq!(tidy_query(""), "");
        assert_eq!(tidy_query("?k=1&&"), "?k=1");
        assert_eq!(tidy_query("?k=1&&&j=2"), "?k=1&j=2");
        assert_eq!(tidy_query("?&k=1"), "?k=1");
        assert_eq!(tidy_query("&color=red&size=m"), "?color=red&size=m");
    }

    #[test]
    fn test_strip_drops_empty_query_before_fragment() {
        assert_eq!(
            strip_tracking_params("https://a.in/x?psc=1&th=1#top"),
            "https://a.in/x#top"
        );
    }

    #[test]
    fn test_strip_leaves_ampersand_in_path() {
        let url = "https://www.amazon.in/Tom&Jerry/dp/X";
        assert_eq!(strip_tracking_params(url), url);

        assert_eq!(
            strip_tracking_params("https://www.amazon.in/Tom&Jerry-DVD/dp/B0X?psc=1&color=red"),
            "https://www.amazon.in/Tom&Jerry-DVD/dp/B0X?color=red"
        );
        assert_eq!(
            strip_tracking_params("https://www.amazon.in/Tom&ref=x/dp/B0X"),
            "https://www.amazon.in/Tom&ref=x/dp/B0X"
        );
    }

    #[test]
    fn test_strip_leaves_fragment_alone() {
        let url = "https://amazon.in/dp/X?k=1#a&ref=top";
        assert_eq!(strip_tracking_params(url), url);
    }

    #[test]
    fn test_append_query() {
        assert_eq!(
            append_query("https://www.flipkart.com/item/p/xyz", "affid=E123"),
            "https://www.flipkart.com/item/p/xyz?affid=E123"
        );
        assert_eq!(
            append_query("https://www.flipkart.com/p?pid=1", "affid=E123"),
            "https://www.flipkart.com/p?pid=1&affid=E123"
        );
        assert_eq!(
            append_query("https://www.ajio.com/p#details", "affid=E1"),
            "https://www.ajio.com/p?affid=E1#details"
        );
    }

    #[test]
    fn test_has_param() {
        assert!(has_param("https://amzn.to/x?tag=me-21", "tag", "me-21"));
        assert!(!has_param("https://amzn.to/x?tag=other-21", "tag", "me-21"));
    }
}
