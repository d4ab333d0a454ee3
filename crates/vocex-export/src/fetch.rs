//! Image fetch collaborator
//!
//! Export needs the raw bytes of each selected asset. Assets reference their
//! source by path, which is either an HTTP URL or a local filesystem path;
//! one fetcher implementation covers each.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use vocex_core::{Asset, Config};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP fetch returned status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read image file: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetches the raw image bytes for an asset.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, asset: &Asset) -> Result<Vec<u8>, FetchError>;
}

/// GETs asset bytes over HTTP.
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs()))
            .user_agent(config.http_user_agent().to_string())
            .build()?;
        Ok(HttpImageFetcher { client })
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, asset: &Asset) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(&asset.path).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: asset.path.clone(),
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().await?;

        tracing::debug!(
            url = %asset.path,
            size_bytes = bytes.len(),
            "Fetched asset image over HTTP"
        );

        Ok(bytes.to_vec())
    }
}

/// Reads asset bytes from the local filesystem.
pub struct FileImageFetcher;

#[async_trait]
impl ImageFetcher for FileImageFetcher {
    async fn fetch(&self, asset: &Asset) -> Result<Vec<u8>, FetchError> {
        let bytes = tokio::fs::read(&asset.path).await?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocex_core::AssetState;

    #[tokio::test]
    async fn file_fetcher_reads_asset_path() {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("img.jpg");
        std::fs::write(&image_path, [0xFF, 0xD8, 0xFF]).unwrap();

        let asset = Asset {
            id: "a1".to_string(),
            name: "img.jpg".to_string(),
            path: image_path.to_string_lossy().into_owned(),
            state: AssetState::Tagged,
            size: None,
        };

        let bytes = FileImageFetcher.fetch(&asset).await.unwrap();
        assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF]);
    }

    #[tokio::test]
    async fn file_fetcher_propagates_missing_file() {
        let asset = Asset {
            id: "a1".to_string(),
            name: "img.jpg".to_string(),
            path: "/nonexistent/img.jpg".to_string(),
            state: AssetState::Tagged,
            size: None,
        };

        let result = FileImageFetcher.fetch(&asset).await;
        assert!(matches!(result, Err(FetchError::Io(_))));
    }
}
