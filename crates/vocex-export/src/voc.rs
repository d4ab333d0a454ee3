//! Pascal VOC export provider
//!
//! Drives the storage collaborator to materialize the VOC dataset layout:
//!
//! ```text
//! <root>/pascal_label_map.pbtxt
//! <root>/JPEGImages/<asset name>
//! <root>/Annotations/<asset name>.xml
//! <root>/ImageSets/            (created, left empty)
//! ```
//!
//! The pipeline is strictly sequential: filter assets, create the four
//! containers, then per selected asset fetch metadata, fetch and write the
//! image, write the annotation, and finally write the shared label map.
//! Downstream consumers rely on file-write order matching asset order, so
//! the per-asset loop must not be parallelized.

use std::sync::Arc;

use vocex_core::{Asset, Project};
use vocex_storage::Storage;

use crate::annotation::build_annotation;
use crate::asset_service::AssetMetadataSource;
use crate::error::ExportError;
use crate::fetch::ImageFetcher;
use crate::label_map::build_label_map;
use crate::options::VocExportOptions;
use crate::provider::{ExportContext, ExportProvider};

pub const PROVIDER_NAME: &str = "pascal-voc";

pub const JPEG_IMAGES_DIR: &str = "JPEGImages";
pub const ANNOTATIONS_DIR: &str = "Annotations";
pub const IMAGE_SETS_DIR: &str = "ImageSets";
pub const LABEL_MAP_FILE: &str = "pascal_label_map.pbtxt";

/// Name of the export root container for a project.
pub fn export_root(project_name: &str) -> String {
    format!("{}-PascalVOC-export", project_name.replace(' ', "-"))
}

/// Exports a tagging project as a Pascal VOC dataset.
pub struct VocExportProvider {
    project: Project,
    options: VocExportOptions,
    storage: Arc<dyn Storage>,
    metadata_source: Arc<dyn AssetMetadataSource>,
    image_fetcher: Arc<dyn ImageFetcher>,
}

impl VocExportProvider {
    pub fn new(project: Project, options: VocExportOptions, context: ExportContext) -> Self {
        VocExportProvider {
            project,
            options,
            storage: context.storage,
            metadata_source: context.metadata_source,
            image_fetcher: context.image_fetcher,
        }
    }

    /// Run the export.
    ///
    /// Any collaborator failure propagates unchanged and aborts the run;
    /// files already written are left in place.
    pub async fn export(&self) -> Result<(), ExportError> {
        self.project.validate()?;

        let root = export_root(&self.project.name);

        let selected: Vec<&Asset> = self
            .project
            .assets
            .iter()
            .filter(|asset| self.options.asset_state.includes(asset.state))
            .collect();

        tracing::info!(
            project = %self.project.name,
            root = %root,
            selected = selected.len(),
            total = self.project.assets.len(),
            asset_state = ?self.options.asset_state,
            "Starting Pascal VOC export"
        );

        self.storage.create_container(&root).await?;
        self.storage
            .create_container(&format!("{}/{}", root, JPEG_IMAGES_DIR))
            .await?;
        self.storage
            .create_container(&format!("{}/{}", root, ANNOTATIONS_DIR))
            .await?;
        self.storage
            .create_container(&format!("{}/{}", root, IMAGE_SETS_DIR))
            .await?;

        for asset in &selected {
            self.export_asset(&root, asset).await?;
        }

        let label_map = build_label_map(&self.project.tags);
        self.storage
            .write_text(&format!("{}/{}", root, LABEL_MAP_FILE), &label_map)
            .await?;

        tracing::info!(
            project = %self.project.name,
            exported = selected.len(),
            tags = self.project.tags.len(),
            "Pascal VOC export complete"
        );

        Ok(())
    }

    async fn export_asset(&self, root: &str, asset: &Asset) -> Result<(), ExportError> {
        let metadata = self.metadata_source.get_asset_metadata(asset).await?;

        let image = self.image_fetcher.fetch(asset).await?;
        self.storage
            .write_binary(&format!("{}/{}/{}", root, JPEG_IMAGES_DIR, asset.name), image)
            .await?;

        let xml = build_annotation(root, &metadata)?;
        self.storage
            .write_text(
                &format!("{}/{}/{}.xml", root, ANNOTATIONS_DIR, asset.name),
                &xml,
            )
            .await?;

        tracing::debug!(asset_id = %asset.id, asset_name = %asset.name, "Exported asset");

        Ok(())
    }
}

#[async_trait::async_trait]
impl ExportProvider for VocExportProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn export(&self) -> Result<(), ExportError> {
        VocExportProvider::export(self).await
    }
}
