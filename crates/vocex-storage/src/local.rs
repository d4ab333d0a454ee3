use crate::traits::{validate_key, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use vocex_core::StorageBackend;

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for exported files (e.g., "./exports")
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    /// Convert a storage key to a filesystem path, rejecting keys that would
    /// resolve outside the base directory.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        validate_key(storage_key)?;
        Ok(self.base_path.join(storage_key))
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn write_bytes(&self, storage_key: &str, data: &[u8]) -> StorageResult<()> {
        let path = self.key_to_path(storage_key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn create_container(&self, container: &str) -> StorageResult<()> {
        let path = self.key_to_path(container)?;

        fs::create_dir_all(&path).await.map_err(|e| {
            StorageError::CreateFailed(format!(
                "Failed to create container {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %container,
            "Local storage container created"
        );

        Ok(())
    }

    async fn write_binary(&self, path: &str, data: Vec<u8>) -> StorageResult<()> {
        self.write_bytes(path, &data).await
    }

    async fn write_text(&self, path: &str, contents: &str) -> StorageResult<()> {
        self.write_bytes(path, contents.as_bytes()).await
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
