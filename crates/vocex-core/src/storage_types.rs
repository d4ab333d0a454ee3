use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Storage backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Local filesystem storage
    Local,
    /// In-memory storage (tests and ephemeral exports)
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(StorageBackend::Local),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!("Unknown storage backend: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_backends() {
        assert_eq!("local".parse::<StorageBackend>(), Ok(StorageBackend::Local));
        assert_eq!(
            "Memory".parse::<StorageBackend>(),
            Ok(StorageBackend::Memory)
        );
    }

    #[test]
    fn rejects_unknown_backend() {
        assert!("s3".parse::<StorageBackend>().is_err());
    }
}
