//! End-to-end tests for the Pascal VOC export provider against scripted
//! collaborators and the in-memory storage backend.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use vocex_core::{
    Asset, AssetMetadata, AssetState, Point, Project, Region, StorageBackend, Tag,
};
use vocex_export::{
    voc, AssetMetadataSource, AssetServiceError, ExportAssetState, ExportContext, ExportError,
    FetchError, ImageFetcher, VocExportOptions, VocExportProvider,
};
use vocex_storage::{MemoryStorage, Operation, Storage, StorageError, StorageResult};

type EventLog = Arc<Mutex<Vec<String>>>;

/// Returns one rectangle region spanning (1,2)-(3,4) with one tag per asset,
/// recording each fetch in the shared event log.
struct ScriptedMetadata {
    events: EventLog,
}

#[async_trait]
impl AssetMetadataSource for ScriptedMetadata {
    async fn get_asset_metadata(
        &self,
        asset: &Asset,
    ) -> Result<AssetMetadata, AssetServiceError> {
        self.events
            .lock()
            .unwrap()
            .push(format!("metadata:{}", asset.id));
        Ok(AssetMetadata {
            asset: asset.clone(),
            regions: vec![Region {
                id: "id".to_string(),
                region_type: vocex_core::RegionType::Rectangle,
                tags: vec!["tag".to_string()],
                points: vec![Point { x: 1.0, y: 2.0 }, Point { x: 3.0, y: 4.0 }],
            }],
            timestamp: None,
        })
    }
}

/// Fails the metadata fetch for one asset id.
struct FailingMetadata {
    fail_for: String,
}

#[async_trait]
impl AssetMetadataSource for FailingMetadata {
    async fn get_asset_metadata(
        &self,
        asset: &Asset,
    ) -> Result<AssetMetadata, AssetServiceError> {
        if asset.id == self.fail_for {
            return Err(AssetServiceError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "metadata service down",
            )));
        }
        Ok(AssetMetadata::empty(asset.clone()))
    }
}

struct StubFetcher {
    events: EventLog,
}

#[async_trait]
impl ImageFetcher for StubFetcher {
    async fn fetch(&self, asset: &Asset) -> Result<Vec<u8>, FetchError> {
        self.events
            .lock()
            .unwrap()
            .push(format!("fetch:{}", asset.id));
        Ok(vec![1, 2, 3])
    }
}

struct FailingFetcher {
    fail_for: String,
}

#[async_trait]
impl ImageFetcher for FailingFetcher {
    async fn fetch(&self, asset: &Asset) -> Result<Vec<u8>, FetchError> {
        if asset.id == self.fail_for {
            return Err(FetchError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "image missing",
            )));
        }
        Ok(vec![1, 2, 3])
    }
}

/// Delegates to `MemoryStorage` while mirroring writes into the shared
/// event log, so cross-collaborator ordering can be asserted.
struct LoggingStorage {
    inner: Arc<MemoryStorage>,
    events: EventLog,
}

#[async_trait]
impl Storage for LoggingStorage {
    async fn create_container(&self, container: &str) -> StorageResult<()> {
        self.events
            .lock()
            .unwrap()
            .push(format!("mkdir:{}", container));
        self.inner.create_container(container).await
    }

    async fn write_binary(&self, path: &str, data: Vec<u8>) -> StorageResult<()> {
        self.events
            .lock()
            .unwrap()
            .push(format!("write_binary:{}", path));
        self.inner.write_binary(path, data).await
    }

    async fn write_text(&self, path: &str, contents: &str) -> StorageResult<()> {
        self.events
            .lock()
            .unwrap()
            .push(format!("write_text:{}", path));
        self.inner.write_text(path, contents).await
    }

    fn backend_type(&self) -> StorageBackend {
        self.inner.backend_type()
    }
}

/// Fails every binary write.
struct BrokenStorage;

#[async_trait]
impl Storage for BrokenStorage {
    async fn create_container(&self, _container: &str) -> StorageResult<()> {
        Ok(())
    }

    async fn write_binary(&self, path: &str, _data: Vec<u8>) -> StorageResult<()> {
        Err(StorageError::WriteFailed(format!("disk full: {}", path)))
    }

    async fn write_text(&self, _path: &str, _contents: &str) -> StorageResult<()> {
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

fn test_asset(number: u32, state: AssetState) -> Asset {
    Asset {
        id: format!("asset-{}", number),
        name: format!("Asset {}", number),
        path: format!("http://localhost/images/Asset {}", number),
        state,
        size: None,
    }
}

/// 4 assets in states [Tagged, Tagged, Visited, NotVisited].
fn test_project(tag_count: usize) -> Project {
    Project {
        name: "Test Project".to_string(),
        assets: vec![
            test_asset(1, AssetState::Tagged),
            test_asset(2, AssetState::Tagged),
            test_asset(3, AssetState::Visited),
            test_asset(4, AssetState::NotVisited),
        ],
        tags: (0..tag_count)
            .map(|i| Tag::new(format!("Tag {}", i)))
            .collect(),
    }
}

struct Harness {
    storage: Arc<MemoryStorage>,
    events: EventLog,
    provider: VocExportProvider,
}

fn harness(project: Project, asset_state: ExportAssetState) -> Harness {
    let events: EventLog = Arc::new(Mutex::new(Vec::new()));
    let storage = Arc::new(MemoryStorage::new());

    let context = ExportContext {
        storage: Arc::new(LoggingStorage {
            inner: Arc::clone(&storage),
            events: Arc::clone(&events),
        }),
        metadata_source: Arc::new(ScriptedMetadata {
            events: Arc::clone(&events),
        }),
        image_fetcher: Arc::new(StubFetcher {
            events: Arc::clone(&events),
        }),
    };

    let provider = VocExportProvider::new(project, VocExportOptions { asset_state }, context);
    Harness {
        storage,
        events,
        provider,
    }
}

fn container_paths(ops: &[Operation]) -> Vec<&str> {
    ops.iter()
        .filter_map(|op| match op {
            Operation::CreateContainer(path) => Some(path.as_str()),
            _ => None,
        })
        .collect()
}

fn binary_paths(ops: &[Operation]) -> Vec<&str> {
    ops.iter()
        .filter_map(|op| match op {
            Operation::WriteBinary { path, .. } => Some(path.as_str()),
            _ => None,
        })
        .collect()
}

fn text_writes(ops: &[Operation]) -> Vec<(&str, &str)> {
    ops.iter()
        .filter_map(|op| match op {
            Operation::WriteText { path, contents } => Some((path.as_str(), contents.as_str())),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn exports_all_assets() {
    let h = harness(test_project(3), ExportAssetState::All);
    h.provider.export().await.unwrap();

    let ops = h.storage.operations();

    let containers = container_paths(&ops);
    assert_eq!(containers.len(), 4);
    assert_eq!(containers[0], "Test-Project-PascalVOC-export");
    assert!(containers[1].ends_with("/JPEGImages"));
    assert!(containers[2].ends_with("/Annotations"));
    assert!(containers[3].ends_with("/ImageSets"));

    let binaries = binary_paths(&ops);
    assert_eq!(binaries.len(), 4);
    for (i, path) in binaries.iter().enumerate() {
        assert!(path.ends_with(&format!("/JPEGImages/Asset {}", i + 1)));
    }

    let texts = text_writes(&ops);
    assert_eq!(texts.len(), 5);
    for (i, (path, _)) in texts.iter().take(4).enumerate() {
        assert!(path.ends_with(&format!("/Annotations/Asset {}.xml", i + 1)));
    }

    // Label map is the final write: one 37-char entry per tag, newline-joined
    let (label_map_path, label_map) = texts[4];
    assert!(label_map_path.ends_with("pascal_label_map.pbtxt"));
    assert_eq!(label_map.len(), 37 * 3 + 2);
}

#[tokio::test]
async fn exports_only_visited_assets_includes_tagged() {
    let h = harness(test_project(1), ExportAssetState::Visited);
    h.provider.export().await.unwrap();

    let ops = h.storage.operations();
    assert_eq!(container_paths(&ops).len(), 4);

    let binaries = binary_paths(&ops);
    assert_eq!(binaries.len(), 3);
    assert!(binaries[0].ends_with("/JPEGImages/Asset 1"));
    assert!(binaries[1].ends_with("/JPEGImages/Asset 2"));
    assert!(binaries[2].ends_with("/JPEGImages/Asset 3"));

    let texts = text_writes(&ops);
    assert_eq!(texts.len(), 4);
    assert!(texts[3].0.ends_with("pascal_label_map.pbtxt"));
    assert_eq!(texts[3].1.len(), 37);
}

#[tokio::test]
async fn exports_only_tagged_assets() {
    let h = harness(test_project(5), ExportAssetState::Tagged);
    h.provider.export().await.unwrap();

    let ops = h.storage.operations();
    assert_eq!(container_paths(&ops).len(), 4);

    let binaries = binary_paths(&ops);
    assert_eq!(binaries.len(), 2);
    assert!(binaries[0].ends_with("/JPEGImages/Asset 1"));
    assert!(binaries[1].ends_with("/JPEGImages/Asset 2"));

    let texts = text_writes(&ops);
    assert_eq!(texts.len(), 3);
    assert_eq!(texts[2].1.len(), 37 * 5 + 4);
}

#[tokio::test]
async fn per_asset_pipeline_is_strictly_sequential() {
    let h = harness(test_project(2), ExportAssetState::Tagged);
    h.provider.export().await.unwrap();

    let events = h.events.lock().unwrap().clone();

    // 4 mkdirs, then per asset: metadata fetch, image fetch, image write,
    // annotation write; label map last.
    let expected: Vec<String> = vec![
        "mkdir:Test-Project-PascalVOC-export".to_string(),
        "mkdir:Test-Project-PascalVOC-export/JPEGImages".to_string(),
        "mkdir:Test-Project-PascalVOC-export/Annotations".to_string(),
        "mkdir:Test-Project-PascalVOC-export/ImageSets".to_string(),
        "metadata:asset-1".to_string(),
        "fetch:asset-1".to_string(),
        "write_binary:Test-Project-PascalVOC-export/JPEGImages/Asset 1".to_string(),
        "write_text:Test-Project-PascalVOC-export/Annotations/Asset 1.xml".to_string(),
        "metadata:asset-2".to_string(),
        "fetch:asset-2".to_string(),
        "write_binary:Test-Project-PascalVOC-export/JPEGImages/Asset 2".to_string(),
        "write_text:Test-Project-PascalVOC-export/Annotations/Asset 2.xml".to_string(),
        "write_text:Test-Project-PascalVOC-export/pascal_label_map.pbtxt".to_string(),
    ];
    assert_eq!(events, expected);
}

#[tokio::test]
async fn written_artifacts_have_expected_contents() {
    let h = harness(test_project(2), ExportAssetState::Tagged);
    h.provider.export().await.unwrap();

    let image = h
        .storage
        .object("Test-Project-PascalVOC-export/JPEGImages/Asset 1")
        .unwrap();
    assert_eq!(image, vec![1, 2, 3]);

    let xml = h
        .storage
        .text("Test-Project-PascalVOC-export/Annotations/Asset 1.xml")
        .unwrap();
    assert!(xml.contains("<filename>Asset 1</filename>"));
    assert!(xml.contains("<name>tag</name>"));
    assert!(xml.contains("<xmin>1</xmin>"));
    assert!(xml.contains("<ymax>4</ymax>"));

    let label_map = h
        .storage
        .text("Test-Project-PascalVOC-export/pascal_label_map.pbtxt")
        .unwrap();
    assert!(label_map.contains("id: 1\n    name: 'Tag 0'"));
    assert!(label_map.contains("id: 2\n    name: 'Tag 1'"));
}

#[tokio::test]
async fn metadata_failure_aborts_export() {
    let events: EventLog = Arc::new(Mutex::new(Vec::new()));
    let storage = Arc::new(MemoryStorage::new());

    let context = ExportContext {
        storage: Arc::new(LoggingStorage {
            inner: Arc::clone(&storage),
            events: Arc::clone(&events),
        }),
        metadata_source: Arc::new(FailingMetadata {
            fail_for: "asset-2".to_string(),
        }),
        image_fetcher: Arc::new(StubFetcher {
            events: Arc::clone(&events),
        }),
    };

    let provider = VocExportProvider::new(
        test_project(1),
        VocExportOptions {
            asset_state: ExportAssetState::All,
        },
        context,
    );
    let err = provider.export().await.unwrap_err();
    assert!(matches!(err, ExportError::Metadata(_)));

    // Asset 1 was fully written before the failure and is left in place;
    // nothing for asset 2 onward, and no label map.
    let ops = storage.operations();
    assert_eq!(binary_paths(&ops).len(), 1);
    assert_eq!(text_writes(&ops).len(), 1);
    assert!(storage
        .object("Test-Project-PascalVOC-export/JPEGImages/Asset 1")
        .is_some());
    assert!(storage
        .text("Test-Project-PascalVOC-export/pascal_label_map.pbtxt")
        .is_none());
}

#[tokio::test]
async fn image_fetch_failure_aborts_export() {
    let events: EventLog = Arc::new(Mutex::new(Vec::new()));
    let storage = Arc::new(MemoryStorage::new());

    let context = ExportContext {
        storage: Arc::new(LoggingStorage {
            inner: Arc::clone(&storage),
            events: Arc::clone(&events),
        }),
        metadata_source: Arc::new(ScriptedMetadata {
            events: Arc::clone(&events),
        }),
        image_fetcher: Arc::new(FailingFetcher {
            fail_for: "asset-1".to_string(),
        }),
    };

    let provider = VocExportProvider::new(
        test_project(1),
        VocExportOptions {
            asset_state: ExportAssetState::All,
        },
        context,
    );
    let err = provider.export().await.unwrap_err();
    assert!(matches!(err, ExportError::Fetch(_)));

    let ops = storage.operations();
    assert_eq!(container_paths(&ops).len(), 4);
    assert!(binary_paths(&ops).is_empty());
    assert!(text_writes(&ops).is_empty());
}

#[tokio::test]
async fn storage_write_failure_propagates() {
    let events: EventLog = Arc::new(Mutex::new(Vec::new()));
    let context = ExportContext {
        storage: Arc::new(BrokenStorage),
        metadata_source: Arc::new(ScriptedMetadata {
            events: Arc::clone(&events),
        }),
        image_fetcher: Arc::new(StubFetcher { events }),
    };

    let provider = VocExportProvider::new(
        test_project(1),
        VocExportOptions {
            asset_state: ExportAssetState::All,
        },
        context,
    );
    let err = provider.export().await.unwrap_err();
    assert!(matches!(
        err,
        ExportError::Storage(StorageError::WriteFailed(_))
    ));
}

#[tokio::test]
async fn empty_selection_still_writes_label_map() {
    let project = Project {
        name: "Empty".to_string(),
        assets: vec![test_asset(1, AssetState::NotVisited)],
        tags: vec![Tag::new("Tag 0")],
    };
    let h = harness(project, ExportAssetState::Tagged);
    h.provider.export().await.unwrap();

    let ops = h.storage.operations();
    assert_eq!(container_paths(&ops).len(), 4);
    assert!(binary_paths(&ops).is_empty());

    let texts = text_writes(&ops);
    assert_eq!(texts.len(), 1);
    assert!(texts[0].0.ends_with(&format!("/{}", voc::LABEL_MAP_FILE)));
    assert_eq!(texts[0].1.len(), 37);
}

#[tokio::test]
async fn duplicate_tags_fail_before_any_storage_call() {
    let project = Project {
        name: "Dup".to_string(),
        assets: vec![test_asset(1, AssetState::Tagged)],
        tags: vec![Tag::new("cat"), Tag::new("cat")],
    };
    let h = harness(project, ExportAssetState::All);

    let err = h.provider.export().await.unwrap_err();
    assert!(matches!(err, ExportError::Project(_)));
    assert!(h.storage.operations().is_empty());
}
