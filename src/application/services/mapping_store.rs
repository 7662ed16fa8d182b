//! In-memory mapping table with whole-table persistence.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::entities::{ConversionRecord, Network, NewConversionRecord};
use crate::domain::repositories::{MappingRepository, MappingTable};
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_valid_code};

/// Random codes tried before giving up on an allocation.
const MAX_ATTEMPTS: usize = 10;

/// Every conversion made so far, keyed by short code.
///
/// The in-memory table is authoritative. The repository only ever receives a
/// full copy of it, so a failed save loses nothing that the next successful
/// save will not write.
#[derive(Debug, Default)]
pub struct MappingStore {
    records: MappingTable,
}

impl MappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populates a store from `repository`.
    ///
    /// A store that cannot be read or parsed starts empty. Keys that are not
    /// valid short codes are dropped.
    pub async fn load<R>(repository: &R) -> Self
    where
        R: MappingRepository + ?Sized,
    {
        let table = match repository.load().await {
            Ok(table) => table,
            Err(e) => {
                warn!(error = %e, "Could not load mappings, starting with an empty store");
                return Self::new();
            }
        };

        let mut records = BTreeMap::new();
        for (code, mut record) in table {
            if !is_valid_code(&code) {
                warn!(code = %code, "Dropping mapping with an invalid short code");
                continue;
            }
            record.short_code.clone_from(&code);
            records.insert(code, record);
        }

        debug!(count = records.len(), "Loaded mappings");
        Self { records }
    }

    /// Writes the whole table to `repository`, replacing what was there.
    ///
    /// # Errors
    ///
    /// Returns the repository error unchanged. The in-memory table is not
    /// affected.
    pub async fn save<R>(&self, repository: &R) -> Result<(), AppError>
    where
        R: MappingRepository + ?Sized,
    {
        repository.save(&self.records).await
    }

    /// Picks a short code not present in the table for converting `url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Transform`] for `url` after 10 colliding attempts.
    pub fn allocate_code(&self, url: &str) -> Result<String, AppError> {
        self.allocate_code_with(url, generate_code)
    }

    fn allocate_code_with(
        &self,
        url: &str,
        mut generate: impl FnMut() -> String,
    ) -> Result<String, AppError> {
        for _ in 0..MAX_ATTEMPTS {
            let code = generate();
            if !self.records.contains_key(&code) {
                return Ok(code);
            }
        }

        Err(AppError::transform(
            url,
            format!("no free short code after {MAX_ATTEMPTS} attempts"),
        ))
    }

    /// Stores `record` under `code`, stamped with the current time.
    ///
    /// `code` should come from [`Self::allocate_code`].
    pub fn insert(&mut self, code: String, record: NewConversionRecord) -> &ConversionRecord {
        let created_at = Utc::now().timestamp_millis();
        let record = record.into_record(code.clone(), created_at);

        self.records.insert(code.clone(), record);
        &self.records[&code]
    }

    /// Allocates a code and stores `record` under it.
    ///
    /// # Errors
    ///
    /// See [`Self::allocate_code`].
    pub fn record(&mut self, record: NewConversionRecord) -> Result<&ConversionRecord, AppError> {
        let code = self.allocate_code(&record.original_url)?;
        Ok(self.insert(code, record))
    }

    pub fn get(&self, code: &str) -> Option<&ConversionRecord> {
        self.records.get(code)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in short code order.
    pub fn records(&self) -> impl Iterator<Item = &ConversionRecord> {
        self.records.values()
    }

    /// Number of stored records per network.
    pub fn count_by_network(&self) -> BTreeMap<Network, usize> {
        let mut counts = BTreeMap::new();
        for record in self.records.values() {
            *counts.entry(record.network).or_insert(0) += 1;
        }
        counts
    }

    /// Removes every record. Only the admin tool does this.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
