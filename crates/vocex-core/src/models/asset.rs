use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::region::Region;

/// Lifecycle state of an asset within a tagging project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetState {
    /// Never opened in the tagging session
    NotVisited,
    /// Opened but carries no regions
    Visited,
    /// Carries at least one tagged region
    Tagged,
}

/// Pixel dimensions of an asset, when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSize {
    pub width: u32,
    pub height: u32,
}

/// A single taggable item (an image) in a project.
///
/// Immutable once loaded for export. `name` is the display name and is used
/// verbatim as the exported file name; `path` is the source location the
/// image bytes are fetched from (HTTP URL or local path).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub path: String,
    pub state: AssetState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<AssetSize>,
}

/// Per-asset annotation record, produced by the asset metadata source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetMetadata {
    pub asset: Asset,
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl AssetMetadata {
    /// Metadata for an asset that was never annotated.
    pub fn empty(asset: Asset) -> Self {
        AssetMetadata {
            asset,
            regions: Vec::new(),
            timestamp: None,
        }
    }
}
