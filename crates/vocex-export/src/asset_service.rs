//! Asset metadata source
//!
//! Per-asset region metadata is owned by an external service; the exporter
//! only reads it. The JSON-file implementation reads `<dir>/<asset id>.json`
//! sidecar documents, which is how tagging sessions persist their work.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use vocex_core::{Asset, AssetMetadata};

#[derive(Debug, Error)]
pub enum AssetServiceError {
    #[error("Failed to read asset metadata: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed asset metadata: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Source of per-asset annotation records.
#[async_trait]
pub trait AssetMetadataSource: Send + Sync {
    async fn get_asset_metadata(&self, asset: &Asset)
        -> Result<AssetMetadata, AssetServiceError>;
}

/// Reads asset metadata from JSON sidecar files.
///
/// A missing sidecar is not an error: the asset was simply never annotated
/// and yields metadata with no regions.
pub struct JsonFileAssetService {
    dir: PathBuf,
}

impl JsonFileAssetService {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileAssetService { dir: dir.into() }
    }

    fn sidecar_path(&self, asset: &Asset) -> PathBuf {
        self.dir.join(format!("{}.json", asset.id))
    }
}

#[async_trait]
impl AssetMetadataSource for JsonFileAssetService {
    async fn get_asset_metadata(
        &self,
        asset: &Asset,
    ) -> Result<AssetMetadata, AssetServiceError> {
        let path = self.sidecar_path(asset);

        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(asset_id = %asset.id, "No metadata sidecar, asset has no regions");
                return Ok(AssetMetadata::empty(asset.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        let metadata: AssetMetadata = serde_json::from_slice(&raw)?;
        Ok(metadata)
    }
}
