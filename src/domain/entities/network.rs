//! Affiliate networks and the ways a link can be rewritten for them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A partner program that pays commission on tagged links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// The marketplace associate program (`tag=` attribution).
    Amazon,
    /// Aggregator program covering fashion and electronics retailers.
    EarnPe,
    /// Aggregator program covering grocery, food and travel retailers.
    EarnKaro,
}

impl Network {
    /// All networks in dispatch order.
    pub const ALL: [Network; 3] = [Network::Amazon, Network::EarnPe, Network::EarnKaro];

    /// Returns the lowercase name used in logs and the mapping file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Amazon => "amazon",
            Network::EarnPe => "earnpe",
            Network::EarnKaro => "earnkaro",
        }
    }

    /// Parses a network name, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "amazon" => Some(Network::Amazon),
            "earnpe" => Some(Network::EarnPe),
            "earnkaro" => Some(Network::EarnKaro),
            _ => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a platform's links are turned into affiliate links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RewriteKind {
    /// Append `affid=<id>` to the original URL.
    DeepLinkAppend,
    /// Replace the URL with `https://<alias>.io/<code>` resolved by an external backend.
    ShortenedRedirect,
    /// Strip tracking parameters and append the network's own attribution.
    CanonicalRewrite,
}

impl RewriteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewriteKind::DeepLinkAppend => "deep-link-append",
            RewriteKind::ShortenedRedirect => "shortened-redirect",
            RewriteKind::CanonicalRewrite => "canonical-rewrite",
        }
    }
}

impl fmt::Display for RewriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storefront region chosen for a canonical Amazon rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// `amazon.in`, the default when a link names no country.
    #[serde(rename = "india")]
    Domestic,
    /// Any other explicit country storefront.
    #[serde(rename = "global")]
    International,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Domestic => "india",
            Region::International => "global",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_parse_round_trips_names() {
        for network in Network::ALL {
            assert_eq!(Network::parse(network.as_str()), Some(network));
        }
        assert_eq!(Network::parse("EarnPe"), Some(Network::EarnPe));
        assert_eq!(Network::parse("ebay"), None);
    }

    #[test]
    fn test_network_serializes_lowercase() {
        let json = serde_json::to_string(&Network::EarnKaro).unwrap();
        assert_eq!(json, "\"earnkaro\"");
    }

    #[test]
    fn test_region_serializes_to_legacy_names() {
        assert_eq!(serde_json::to_string(&Region::Domestic).unwrap(), "\"india\"");
        assert_eq!(
            serde_json::from_str::<Region>("\"global\"").unwrap(),
            Region::International
        );
    }
}
