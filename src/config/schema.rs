//! Configuration schema for Larder
//!
//! Configuration is stored at `~/.config/larder/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default feed freshness threshold: 30 days, in seconds.
pub const DEFAULT_FRESHNESS_SECS: u64 = 30 * 24 * 60 * 60;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Feed checking settings
    pub feeds: FeedsConfig,

    /// Cache search settings
    pub cache: CacheConfig,
}

impl Config {
    /// Effective freshness threshold in seconds.
    ///
    /// `freshness = 0` in the config file is the way to spell "never check
    /// automatically" in TOML, so it maps to `None` here.
    pub fn freshness(&self) -> Option<u64> {
        match self.feeds.freshness {
            Some(0) | None => None,
            other => other,
        }
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: "text".to_string(),
        }
    }
}

/// Feed checking settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedsConfig {
    /// Maximum age (seconds) before a cached feed needs re-checking.
    /// `None` disables automatic checks entirely.
    pub freshness: Option<u64>,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            freshness: Some(DEFAULT_FRESHNESS_SECS),
        }
    }
}

/// Cache search settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Additional cache roots searched after the primary user root,
    /// in order. First match wins.
    pub extra_roots: Vec<PathBuf>,
}
