//! JSON file mapping repository.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::domain::entities::ConversionRecord;
use crate::domain::repositories::{MappingRepository, MappingTable};
use crate::error::AppError;

/// Stores the mapping table as one pretty-printed JSON object on disk.
///
/// Keys are short codes and values are records. Writes go to a sibling
/// temporary file that is then renamed over the target, so readers never
/// see a half-written table.
///
/// A record that does not parse is skipped on load with a warning; only a
/// file that is not a JSON object at all fails the load.
#[derive(Debug, Clone)]
pub struct JsonFileMappingRepository {
    path: PathBuf,
}

impl JsonFileMappingRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("json.tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            AppError::persistence(format!(
                "failed to replace {}: {e}",
                self.path.display()
            ))
        })
    }
}

#[async_trait]
impl MappingRepository for JsonFileMappingRepository {
    async fn load(&self) -> Result<MappingTable, AppError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No mapping file yet");
                return Ok(MappingTable::new());
            }
            Err(e) => return Err(AppError::Io(e)),
        };

        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_slice(&bytes)?;

        let mut table = MappingTable::new();
        for (code, value) in raw {
            match serde_json::from_value::<ConversionRecord>(value) {
                Ok(record) => {
                    table.insert(code, record);
                }
                Err(e) => warn!(code = %code, error = %e, "Skipping unreadable mapping"),
            }
        }

        Ok(table)
    }

    async fn save(&self, records: &MappingTable) -> Result<(), AppError> {
        let bytes = serde_json::to_vec_pretty(records)?;
        self.write_bytes(&bytes).await?;

        debug!(
            path = %self.path.display(),
            count = records.len(),
            "Saved mappings"
        );
        Ok(())
    }
}
