//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement. The exporter only ever creates containers and writes files, so
//! the surface is intentionally write-only.

use async_trait::async_trait;
use thiserror::Error;
use vocex_core::StorageBackend;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Container creation failed: {0}")]
    CreateFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (local filesystem, in-memory) must implement this
/// trait. The exporter drives a `dyn Storage` so any backing store can be
/// substituted. All operations fail loudly; a silent partial write would
/// corrupt the exported dataset.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Create a container (directory-like namespace) at the given key.
    ///
    /// Creating a container that already exists is not an error.
    async fn create_container(&self, container: &str) -> StorageResult<()>;

    /// Write raw bytes to the given key, overwriting any existing object.
    async fn write_binary(&self, path: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Write UTF-8 text to the given key, overwriting any existing object.
    async fn write_text(&self, path: &str, contents: &str) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

/// Reject keys that could escape the backend root.
///
/// Shared by backends so key validation stays consistent.
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if key.contains("..") || key.starts_with('/') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}
