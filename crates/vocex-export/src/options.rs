use serde::{Deserialize, Serialize};
use vocex_core::AssetState;

/// Filter selecting which assets participate in an export.
///
/// Pure predicate over [`AssetState`]; carries no persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportAssetState {
    /// Every asset in the project
    All,
    /// Assets that were opened, including tagged ones
    Visited,
    /// Only assets carrying tagged regions
    Tagged,
}

impl ExportAssetState {
    pub fn includes(self, state: AssetState) -> bool {
        match self {
            ExportAssetState::All => true,
            ExportAssetState::Visited => {
                matches!(state, AssetState::Visited | AssetState::Tagged)
            }
            ExportAssetState::Tagged => matches!(state, AssetState::Tagged),
        }
    }
}

/// Options recognized by the Pascal VOC export provider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VocExportOptions {
    pub asset_state: ExportAssetState,
}
