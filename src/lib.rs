//! # Affiliate Linker
//!
//! Finds commerce links in free-form message text and rewrites them into
//! affiliate-tagged links for the configured partner networks.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Networks, records, the platform rule table and repository traits
//! - **Application Layer** ([`application`]) - Classification, rewriting and the conversion pipeline
//! - **Infrastructure Layer** ([`infrastructure`]) - Mapping file persistence
//!
//! ## Features
//!
//! - Marketplace links cleaned of tracking parameters and tagged
//! - Deep-link and short-redirect rewrites for the EarnPe and EarnKaro networks
//! - Idempotent: converting already converted text changes nothing
//! - Every conversion recorded under a short code and saved to disk
//!
//! ## Quick Start
//!
//! ```bash
//! export AMAZON_TAG="mytag-21"
//! export EARNPE_ID="E123"
//!
//! echo "Deal: https://www.amazon.in/dp/B000ABCDEF?psc=1" | cargo run
//! ```
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub mod config;
pub mod telemetry;

pub use error::AppError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{ConversionReport, LinkConverter, MappingStore};
    pub use crate::domain::entities::{
        AffiliateIds, ConversionRecord, ConversionStats, Network, StatsReport,
    };
    pub use crate::domain::repositories::MappingRepository;
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::{
        JsonFileMappingRepository, NullMappingRepository,
    };
}
