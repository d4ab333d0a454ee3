//! Vocex Storage Library
//!
//! This crate provides the storage abstraction the exporter writes through,
//! plus local-filesystem and in-memory implementations.
//!
//! # Storage key format
//!
//! Keys are forward-slash separated paths relative to the backend root, e.g.
//! `My-Project-PascalVOC-export/JPEGImages/Asset 1`. Keys must not contain
//! `..` or a leading `/`; backends reject such keys before touching the
//! underlying store.

pub mod factory;
pub mod local;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use local::LocalStorage;
pub use memory::{MemoryStorage, Operation};
pub use traits::{Storage, StorageError, StorageResult};
pub use vocex_core::StorageBackend;
