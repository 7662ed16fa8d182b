//! Mapping repository implementations.
//!
//! # Repositories
//!
//! - [`JsonFileMappingRepository`] - JSON object on the local file system
//! - [`NullMappingRepository`] - Discards everything, for dry runs

pub mod json_mapping_repository;
pub mod null_mapping_repository;

pub use json_mapping_repository::JsonFileMappingRepository;
pub use null_mapping_repository::NullMappingRepository;
