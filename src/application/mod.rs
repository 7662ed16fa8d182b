//! Application layer services implementing the conversion pipeline.
//!
//! Services combine the domain rule tables with a mapping repository and
//! expose the API used by the binaries.
//!
//! # Available Services
//!
//! - [`services::LinkConverter`] - Scans, converts and persists a whole message
//! - [`services::AffiliateTransformer`] - Rewrites a single URL for its network
//! - [`services::DomainClassifier`] - Maps a URL's host to a network
//! - [`services::MappingStore`] - In-memory mapping table with persistence
//! - [`services::StatsCounter`] - Per-network conversion counters

pub mod services;
