#![allow(dead_code)]

use affiliate_linker::application::services::LinkConverter;
use affiliate_linker::domain::entities::AffiliateIds;
use affiliate_linker::infrastructure::persistence::JsonFileMappingRepository;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub const AMAZON_TAG: &str = "mytag-21";
pub const EARNPE_ID: &str = "E123";
pub const EARNKARO_ID: &str = "K456";

pub fn all_ids() -> AffiliateIds {
    AffiliateIds::new(
        Some(AMAZON_TAG.to_string()),
        Some(EARNPE_ID.to_string()),
        Some(EARNKARO_ID.to_string()),
    )
}

/// Temporary directory holding a mapping file path.
pub struct TestStore {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("url_mappings.json");
        Self { dir, path }
    }

    pub fn repository(&self) -> Arc<JsonFileMappingRepository> {
        Arc::new(JsonFileMappingRepository::new(&self.path))
    }

    pub async fn converter(&self, ids: AffiliateIds) -> LinkConverter<JsonFileMappingRepository> {
        LinkConverter::initialize(ids, self.repository()).await
    }

    pub fn read_json(&self) -> serde_json::Value {
        let bytes = std::fs::read(&self.path).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
