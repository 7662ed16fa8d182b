//! Conversion services for the application layer.

pub mod affiliate_transformer;
pub mod domain_classifier;
pub mod link_converter;
pub mod mapping_store;
pub mod stats_counter;

pub use affiliate_transformer::{AffiliateTransformer, SkipReason, Transformation};
pub use domain_classifier::DomainClassifier;
pub use link_converter::{ConversionReport, LinkConverter};
pub use mapping_store::MappingStore;
pub use stats_counter::StatsCounter;
