//! Core domain entities representing the conversion data model.
//!
//! # Entity Types
//!
//! - [`Network`] - An affiliate partner program
//! - [`ConversionRecord`] - A stored mapping for one converted link
//! - [`ConversionStats`] - Per-network conversion counters
//! - [`AffiliateIds`] - The identifiers used to tag links
//!
//! Records follow the same "New Type" split as elsewhere in the crate:
//! [`NewConversionRecord`] is what a rewrite produces, and the store turns it
//! into a [`ConversionRecord`] once a short code has been allocated.

pub mod affiliate_ids;
pub mod conversion_record;
pub mod conversion_stats;
pub mod network;

pub use affiliate_ids::AffiliateIds;
pub use conversion_record::{ConversionRecord, NewConversionRecord};
pub use conversion_stats::{ConversionStats, PlatformCounts, StatsReport};
pub use network::{Network, Region, RewriteKind};
