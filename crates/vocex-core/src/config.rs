//! Configuration module
//!
//! Env-var driven configuration for the export service. `.env` files are
//! honored via dotenvy. Callers construct with `Config::from_env()` and read
//! through the accessor methods.

use std::env;

use crate::storage_types::StorageBackend;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = "vocex-export";

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    environment: String,
    storage_backend: Option<StorageBackend>,
    local_storage_path: Option<String>,
    http_timeout_secs: u64,
    http_user_agent: String,
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let storage_backend = match env_opt("STORAGE_BACKEND") {
            Some(raw) => Some(raw.parse::<StorageBackend>().map_err(anyhow::Error::msg)?),
            None => None,
        };

        let http_timeout_secs = match env_opt("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| anyhow::anyhow!("Invalid HTTP_TIMEOUT_SECS: {}", e))?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Config {
            environment: env_or("VOCEX_ENV", "development"),
            storage_backend,
            local_storage_path: env_opt("LOCAL_STORAGE_PATH"),
            http_timeout_secs,
            http_user_agent: env_or("HTTP_USER_AGENT", DEFAULT_USER_AGENT),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.storage_backend
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.local_storage_path.as_deref()
    }

    pub fn http_timeout_secs(&self) -> u64 {
        self.http_timeout_secs
    }

    pub fn http_user_agent(&self) -> &str {
        &self.http_user_agent
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.http_timeout_secs == 0 {
            anyhow::bail!("HTTP_TIMEOUT_SECS must be greater than zero");
        }
        if self.storage_backend == Some(StorageBackend::Local)
            && self.local_storage_path.is_none()
        {
            anyhow::bail!("LOCAL_STORAGE_PATH is required for the local storage backend");
        }
        Ok(())
    }
}

/// Build a configuration directly, bypassing the environment. Used by the
/// CLI where flags take precedence over env vars, and by tests.
#[derive(Default)]
pub struct ConfigBuilder {
    environment: Option<String>,
    storage_backend: Option<StorageBackend>,
    local_storage_path: Option<String>,
    http_timeout_secs: Option<u64>,
    http_user_agent: Option<String>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn storage_backend(mut self, backend: StorageBackend) -> Self {
        self.storage_backend = Some(backend);
        self
    }

    pub fn local_storage_path(mut self, path: impl Into<String>) -> Self {
        self.local_storage_path = Some(path.into());
        self
    }

    pub fn http_timeout_secs(mut self, secs: u64) -> Self {
        self.http_timeout_secs = Some(secs);
        self
    }

    pub fn http_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.http_user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Config {
        Config {
            environment: self.environment.unwrap_or_else(|| "development".to_string()),
            storage_backend: self.storage_backend,
            local_storage_path: self.local_storage_path,
            http_timeout_secs: self.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            http_user_agent: self
                .http_user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        }
    }
}
