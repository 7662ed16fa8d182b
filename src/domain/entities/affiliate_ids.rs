//! Affiliate identifiers per network.

use super::network::Network;

/// The identifiers used to tag links, one per network.
///
/// Each is independently optional: a missing identifier disables conversions
/// for that network only. Blank values are treated as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffiliateIds {
    pub amazon_tag: Option<String>,
    pub earnpe_id: Option<String>,
    pub earnkaro_id: Option<String>,
}

impl AffiliateIds {
    pub fn new(
        amazon_tag: Option<String>,
        earnpe_id: Option<String>,
        earnkaro_id: Option<String>,
    ) -> Self {
        Self {
            amazon_tag: non_blank(amazon_tag),
            earnpe_id: non_blank(earnpe_id),
            earnkaro_id: non_blank(earnkaro_id),
        }
    }

    /// Returns the identifier configured for `network`, if any.
    pub fn id_for(&self, network: Network) -> Option<&str> {
        let id = match network {
            Network::Amazon => &self.amazon_tag,
            Network::EarnPe => &self.earnpe_id,
            Network::EarnKaro => &self.earnkaro_id,
        };
        id.as_deref().filter(|id| !id.is_empty())
    }

    /// Returns true if no network has an identifier.
    pub fn is_empty(&self) -> bool {
        Network::ALL.iter().all(|n| self.id_for(*n).is_none())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
