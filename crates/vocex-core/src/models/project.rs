use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::asset::Asset;

/// A named label with an optional display color.
///
/// Tag names are used verbatim as XML identifiers and label-map entries, so
/// they must be unique within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            color: None,
        }
    }
}

/// An image-tagging project snapshot.
///
/// Assets are kept in insertion order; export walks them in this order and
/// downstream consumers rely on file-write order matching it. Tag order
/// determines label-map ids (1-based position).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Project {
    /// Look up an asset by id.
    pub fn asset(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Check project invariants: asset ids and tag names must be unique.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut seen_ids = HashSet::new();
        for asset in &self.assets {
            if !seen_ids.insert(asset.id.as_str()) {
                return Err(AppError::InvalidInput(format!(
                    "Duplicate asset id: {}",
                    asset.id
                )));
            }
        }

        let mut seen_tags = HashSet::new();
        for tag in &self.tags {
            if !seen_tags.insert(tag.name.as_str()) {
                return Err(AppError::InvalidInput(format!(
                    "Duplicate tag name: {}",
                    tag.name
                )));
            }
        }

        Ok(())
    }
}
