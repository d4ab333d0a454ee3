use async_trait::async_trait;
use vocex_core::{Asset, Config};
use vocex_export::{FetchError, FileImageFetcher, HttpImageFetcher, ImageFetcher};

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// True when an asset path should be fetched over HTTP.
pub fn is_http_path(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Dispatches per asset path: HTTP URLs go through reqwest, everything else
/// is read from the local filesystem.
pub struct SchemeImageFetcher {
    http: HttpImageFetcher,
    file: FileImageFetcher,
}

impl SchemeImageFetcher {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        Ok(SchemeImageFetcher {
            http: HttpImageFetcher::new(config)?,
            file: FileImageFetcher,
        })
    }
}

#[async_trait]
impl ImageFetcher for SchemeImageFetcher {
    async fn fetch(&self, asset: &Asset) -> Result<Vec<u8>, FetchError> {
        if is_http_path(&asset.path) {
            self.http.fetch(asset).await
        } else {
            self.file.fetch(asset).await
        }
    }
}
