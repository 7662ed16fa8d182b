//! Repository trait definitions for the domain layer.
//!
//! Traits here abstract where conversion state lives. Implementations are in
//! `crate::infrastructure::persistence`; mocks are generated with `mockall`
//! for unit tests.
//!
//! # Available Repositories
//!
//! - [`MappingRepository`] - Whole-table load and save of conversion records
//!
//! # Testing
//!
//! See integration tests in `tests/repository_mapping.rs` for usage examples.

pub mod mapping_repository;

pub use mapping_repository::{MappingRepository, MappingTable};

#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
