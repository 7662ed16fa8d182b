//! No-op mapping repository for dry runs.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::repositories::{MappingRepository, MappingTable};
use crate::error::AppError;

/// A repository that stores nothing.
///
/// Loads return an empty table and saves are discarded. Used by
/// `admin convert --dry-run` so that trying out a message leaves the
/// mapping file untouched.
pub struct NullMappingRepository;

impl NullMappingRepository {
    pub fn new() -> Self {
        debug!("Using NullMappingRepository (mappings are not persisted)");
        Self
    }
}

impl Default for NullMappingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MappingRepository for NullMappingRepository {
    async fn load(&self) -> Result<MappingTable, AppError> {
        Ok(MappingTable::new())
    }

    async fn save(&self, _records: &MappingTable) -> Result<(), AppError> {
        Ok(())
    }
}
