//! Repository trait for the conversion mapping store.

use crate::domain::entities::ConversionRecord;
use crate::error::AppError;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Mapping table keyed by short code.
pub type MappingTable = BTreeMap<String, ConversionRecord>;

/// Durable storage for the full mapping table.
///
/// The table is always read and written as a whole: there is no incremental
/// append. A successful `save` leaves the backing store reflecting exactly the
/// table it was given.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::JsonFileMappingRepository`] - JSON file on disk
/// - [`crate::infrastructure::persistence::NullMappingRepository`] - Discards writes (dry runs)
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_mapping.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Reads the stored table.
    ///
    /// A store that does not exist yet yields an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] if the store cannot be read and
    /// [`AppError::Json`] if its contents are not a valid mapping table.
    async fn load(&self) -> Result<MappingTable, AppError>;

    /// Replaces the stored table with `records`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] or [`AppError::Io`] if the write fails.
    /// The previous contents are left intact in that case.
    async fn save(&self, records: &MappingTable) -> Result<(), AppError>;
}
