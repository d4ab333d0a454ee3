//! Export provider trait and factory
//!
//! Providers are registered by name and constructed from a project, a
//! provider-specific options document, and the collaborator set. Pascal VOC
//! is the only registered format; the registry exists so callers select
//! providers by name rather than by concrete type.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use vocex_core::Project;
use vocex_storage::Storage;

use crate::asset_service::AssetMetadataSource;
use crate::error::ExportError;
use crate::fetch::ImageFetcher;
use crate::options::VocExportOptions;
use crate::voc::{VocExportProvider, PROVIDER_NAME};

/// A named export transformation over a project snapshot.
#[async_trait]
pub trait ExportProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn export(&self) -> Result<(), ExportError>;
}

/// The collaborator set an export provider drives.
#[derive(Clone)]
pub struct ExportContext {
    pub storage: Arc<dyn Storage>,
    pub metadata_source: Arc<dyn AssetMetadataSource>,
    pub image_fetcher: Arc<dyn ImageFetcher>,
}

type ProviderCtor =
    fn(Project, serde_json::Value, ExportContext) -> Result<Box<dyn ExportProvider>, ExportError>;

/// Name-keyed registry of export provider constructors.
pub struct ExportProviderFactory {
    providers: HashMap<&'static str, ProviderCtor>,
}

impl ExportProviderFactory {
    /// An empty registry.
    pub fn new() -> Self {
        ExportProviderFactory {
            providers: HashMap::new(),
        }
    }

    /// A registry with all built-in providers registered.
    pub fn with_defaults() -> Self {
        let mut factory = Self::new();
        factory.register(PROVIDER_NAME, create_voc_provider);
        factory
    }

    pub fn register(&mut self, name: &'static str, ctor: ProviderCtor) {
        self.providers.insert(name, ctor);
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.providers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Construct a provider by name.
    pub fn create(
        &self,
        name: &str,
        project: Project,
        options: serde_json::Value,
        context: ExportContext,
    ) -> Result<Box<dyn ExportProvider>, ExportError> {
        let ctor = self
            .providers
            .get(name)
            .ok_or_else(|| ExportError::UnknownProvider(name.to_string()))?;
        ctor(project, options, context)
    }
}

impl Default for ExportProviderFactory {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn create_voc_provider(
    project: Project,
    options: serde_json::Value,
    context: ExportContext,
) -> Result<Box<dyn ExportProvider>, ExportError> {
    let options: VocExportOptions = serde_json::from_value(options)
        .map_err(|e| ExportError::InvalidOptions(e.to_string()))?;
    Ok(Box::new(VocExportProvider::new(project, options, context)))
}
