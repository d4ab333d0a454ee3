use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use vocex_core::StorageBackend;

use crate::traits::{validate_key, Storage, StorageResult};

/// A storage operation as issued against a [`MemoryStorage`].
///
/// The memory backend records every operation in issue order so tests can
/// assert call counts and sequencing against the exporter's contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CreateContainer(String),
    WriteBinary { path: String, size: usize },
    WriteText { path: String, contents: String },
}

impl Operation {
    /// The storage key the operation targeted.
    pub fn path(&self) -> &str {
        match self {
            Operation::CreateContainer(path) => path,
            Operation::WriteBinary { path, .. } => path,
            Operation::WriteText { path, .. } => path,
        }
    }
}

/// In-memory storage implementation
///
/// Holds written objects in a path-keyed map. Used by tests as a stand-in
/// for a real backend, and usable for ephemeral exports that are inspected
/// and discarded.
#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    log: Mutex<Vec<Operation>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read back a written object.
    pub fn object(&self, path: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(path).cloned()
    }

    /// Read back a written object as text.
    pub fn text(&self, path: &str) -> Option<String> {
        self.object(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Every operation issued so far, in issue order.
    pub fn operations(&self) -> Vec<Operation> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, op: Operation) {
        self.log.lock().unwrap().push(op);
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_container(&self, container: &str) -> StorageResult<()> {
        validate_key(container)?;
        self.record(Operation::CreateContainer(container.to_string()));
        Ok(())
    }

    async fn write_binary(&self, path: &str, data: Vec<u8>) -> StorageResult<()> {
        validate_key(path)?;
        self.record(Operation::WriteBinary {
            path: path.to_string(),
            size: data.len(),
        });
        self.objects.lock().unwrap().insert(path.to_string(), data);
        Ok(())
    }

    async fn write_text(&self, path: &str, contents: &str) -> StorageResult<()> {
        validate_key(path)?;
        self.record(Operation::WriteText {
            path: path.to_string(),
            contents: contents.to_string(),
        });
        self.objects
            .lock()
            .unwrap()
            .insert(path.to_string(), contents.as_bytes().to_vec());
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
