//! Mapping record written for every conversion.

use super::network::{Network, Region};
use serde::{Deserialize, Serialize};

/// A single conversion kept in the mapping store.
///
/// The short code is the key of the persisted JSON object, so it is not part of
/// the serialized value; [`crate::application::services::MappingStore`] fills it
/// in on load. Records are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    #[serde(skip)]
    pub short_code: String,
    pub original_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_url: Option<String>,
    pub affiliate_id: String,
    pub platform: String,
    #[serde(rename = "affiliateNetwork")]
    pub network: Network,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    /// Creation time in epoch milliseconds.
    #[serde(rename = "timestamp")]
    pub created_at: i64,
}

/// Input data for a record, before a short code is allocated.
#[derive(Debug, Clone)]
pub struct NewConversionRecord {
    pub original_url: String,
    pub affiliate_url: Option<String>,
    pub affiliate_id: String,
    pub platform: String,
    pub network: Network,
    pub region: Option<Region>,
}

impl NewConversionRecord {
    /// Builds the stored record under `short_code`, stamped with `created_at`.
    pub fn into_record(self, short_code: String, created_at: i64) -> ConversionRecord {
        ConversionRecord {
            short_code,
            original_url: self.original_url,
            affiliate_url: self.affiliate_url,
            affiliate_id: self.affiliate_id,
            platform: self.platform,
            network: self.network,
            region: self.region,
            created_at,
        }
    }
}
