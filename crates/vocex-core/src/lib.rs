//! Vocex Core Library
//!
//! This crate provides the domain models, error types, and configuration
//! shared across all Vocex components. A project is a read-only snapshot of
//! an image-tagging session: a set of assets, a set of tags, and per-asset
//! region metadata supplied by an external metadata source.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::AppError;
pub use models::{
    Asset, AssetMetadata, AssetSize, AssetState, Point, Project, Region, RegionType, Tag,
};
pub use storage_types::StorageBackend;
