//! Vocex Export Library
//!
//! This crate provides the Pascal VOC export provider: the transformation
//! from an in-memory tagging project to the VOC on-disk dataset layout
//! (`JPEGImages/`, `Annotations/`, `ImageSets/`, `pascal_label_map.pbtxt`),
//! driven through the storage abstraction from `vocex-storage`.
//!
//! Collaborators are capability traits: [`Storage`] for writes,
//! [`AssetMetadataSource`] for per-asset region metadata, and
//! [`ImageFetcher`] for raw image bytes. Any of them can be substituted.
//!
//! [`Storage`]: vocex_storage::Storage

pub mod annotation;
pub mod asset_service;
pub mod error;
pub mod fetch;
pub mod label_map;
pub mod options;
pub mod provider;
pub mod voc;

// Re-export commonly used types
pub use asset_service::{AssetMetadataSource, AssetServiceError, JsonFileAssetService};
pub use error::ExportError;
pub use fetch::{FetchError, FileImageFetcher, HttpImageFetcher, ImageFetcher};
pub use options::{ExportAssetState, VocExportOptions};
pub use provider::{ExportContext, ExportProvider, ExportProviderFactory};
pub use voc::VocExportProvider;
