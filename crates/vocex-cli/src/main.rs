//! Vocex CLI — exports image-tagging projects as Pascal VOC datasets.
//!
//! Project files are JSON snapshots; per-asset region metadata is read from
//! `<asset id>.json` sidecars next to the project file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use vocex_cli::{init_tracing, SchemeImageFetcher};
use vocex_core::{Config, Project};
use vocex_export::{
    ExportAssetState, ExportContext, ExportProviderFactory, JsonFileAssetService,
    VocExportOptions,
};
use vocex_storage::LocalStorage;

#[derive(Parser)]
#[command(name = "vocex", about = "Pascal VOC dataset exporter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a project as a Pascal VOC dataset
    Export {
        /// Path to the project JSON file
        #[arg(long)]
        project: PathBuf,
        /// Directory the dataset is written under
        #[arg(long)]
        out: PathBuf,
        /// Which assets to include
        #[arg(long, value_enum, default_value_t = AssetFilter::All)]
        assets: AssetFilter,
        /// Export format
        #[arg(long, default_value = "pascal-voc")]
        format: String,
    },
    /// Parse a project file and check its invariants
    Validate {
        /// Path to the project JSON file
        #[arg(long)]
        project: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum AssetFilter {
    All,
    Visited,
    Tagged,
}

impl From<AssetFilter> for ExportAssetState {
    fn from(filter: AssetFilter) -> Self {
        match filter {
            AssetFilter::All => ExportAssetState::All,
            AssetFilter::Visited => ExportAssetState::Visited,
            AssetFilter::Tagged => ExportAssetState::Tagged,
        }
    }
}

async fn load_project(path: &Path) -> anyhow::Result<Project> {
    let raw = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read project file {}", path.display()))?;
    let project: Project = serde_json::from_slice(&raw)
        .with_context(|| format!("Failed to parse project file {}", path.display()))?;
    Ok(project)
}

async fn run_export(
    project_path: &Path,
    out: &Path,
    assets: AssetFilter,
    format: &str,
) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    config.validate()?;

    let project = load_project(project_path).await?;
    project.validate().context("Invalid project")?;

    let metadata_dir = project_path.parent().unwrap_or_else(|| Path::new("."));

    let storage = LocalStorage::new(out)
        .await
        .context("Failed to open output directory")?;

    let context = ExportContext {
        storage: Arc::new(storage),
        metadata_source: Arc::new(JsonFileAssetService::new(metadata_dir)),
        image_fetcher: Arc::new(SchemeImageFetcher::new(&config)?),
    };

    let options = serde_json::to_value(VocExportOptions {
        asset_state: assets.into(),
    })?;

    let factory = ExportProviderFactory::with_defaults();
    let provider = factory.create(format, project, options, context)?;
    provider.export().await?;

    println!("Export complete: {}", out.display());
    Ok(())
}

async fn run_validate(project_path: &Path) -> anyhow::Result<()> {
    let project = load_project(project_path).await?;
    project.validate().context("Invalid project")?;

    println!(
        "{}: {} assets, {} tags",
        project.name,
        project.assets.len(),
        project.tags.len()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Export {
            project,
            out,
            assets,
            format,
        } => run_export(&project, &out, assets, &format).await,
        Commands::Validate { project } => run_validate(&project).await,
    }
}
