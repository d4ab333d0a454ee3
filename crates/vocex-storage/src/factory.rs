use std::sync::Arc;

use vocex_core::{Config, StorageBackend};

use crate::{LocalStorage, MemoryStorage, Storage, StorageError, StorageResult};

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let backend = config.storage_backend().unwrap_or(StorageBackend::Local);

    match backend {
        StorageBackend::Local => {
            let base_path = config
                .local_storage_path()
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
                })?;

            let storage = LocalStorage::new(base_path).await?;
            Ok(Arc::new(storage))
        }

        StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
    }
}
