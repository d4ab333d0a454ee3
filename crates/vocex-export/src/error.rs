use thiserror::Error;
use vocex_core::AppError;
use vocex_storage::StorageError;

use crate::asset_service::AssetServiceError;
use crate::fetch::FetchError;

/// Errors surfaced by an export run.
///
/// Collaborator failures are propagated unchanged: no retry, no rollback,
/// and files written before the failure are left in place.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Asset metadata error: {0}")]
    Metadata(#[from] AssetServiceError),

    #[error("Image fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid export options: {0}")]
    InvalidOptions(String),

    #[error("Unknown export provider: {0}")]
    UnknownProvider(String),

    #[error(transparent)]
    Project(#[from] AppError),
}
