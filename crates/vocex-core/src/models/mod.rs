//! Data models for the export service
//!
//! All entities here are read-only snapshots: the exporter consumes them but
//! never mutates or persists them. Asset metadata is produced by an external
//! metadata source and attached per asset at export time.

mod asset;
mod project;
mod region;

// Re-export all models for convenient imports
pub use asset::{Asset, AssetMetadata, AssetSize, AssetState};
pub use project::{Project, Tag};
pub use region::{Point, Region, RegionType};
