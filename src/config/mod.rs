//! Configuration management for Larder

pub mod schema;

pub use schema::Config;

use crate::error::{LarderError, LarderResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// On-disk namespace: site directory under each cache/config root.
pub const CONFIG_SITE: &str = "larder.dev";

/// On-disk namespace: program directory under the site directory.
pub const CONFIG_PROG: &str = "resolver";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("larder")
            .join("config.toml")
    }

    /// Primary per-user cache root (the one new cache entries would land in)
    pub fn user_cache_root() -> PathBuf {
        dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Primary per-user config root holding interface overrides
    pub fn user_config_root() -> PathBuf {
        dirs::config_dir().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Ordered list of cache roots to search, user root first.
    /// First match wins on lookup.
    pub fn cache_roots(config: &Config) -> Vec<PathBuf> {
        let mut roots = vec![Self::user_cache_root()];
        roots.extend(config.cache.extra_roots.iter().cloned());
        roots
    }

    /// Load configuration, using defaults if the file does not exist
    pub async fn load(&self) -> LarderResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> LarderResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| LarderError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| LarderError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
