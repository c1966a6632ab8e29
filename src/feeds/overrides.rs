//! Feed override records
//!
//! Override records are owned by a sibling subsystem; this crate only needs
//! the `last-checked` timestamp for staleness decisions, looked up through
//! the [`OverrideStore`] seam. The filesystem-backed store reads the same
//! per-interface override file as the interface config loader.

use crate::error::LarderResult;
use crate::feeds::iface_config::InterfaceConfigLoader;
use async_trait::async_trait;
use std::path::PathBuf;

/// The slice of a feed's override record this crate reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideRecord {
    /// When the feed was last successfully checked, seconds since the epoch
    pub last_checked: Option<i64>,
}

/// Lookup seam for override records, keyed by feed identifier.
#[async_trait]
pub trait OverrideStore: Send + Sync {
    /// Load the record for `uri`, if one exists
    async fn load(&self, uri: &str) -> LarderResult<Option<OverrideRecord>>;
}

/// Filesystem-backed store over the per-interface override files.
pub struct FsOverrideStore {
    loader: InterfaceConfigLoader,
}

impl FsOverrideStore {
    pub fn new() -> Self {
        Self {
            loader: InterfaceConfigLoader::new(),
        }
    }

    pub fn with_root(config_root: PathBuf) -> Self {
        Self {
            loader: InterfaceConfigLoader::with_root(config_root),
        }
    }
}

impl Default for FsOverrideStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OverrideStore for FsOverrideStore {
    async fn load(&self, uri: &str) -> LarderResult<Option<OverrideRecord>> {
        let Some(raw) = self.loader.read_raw(uri).await? else {
            return Ok(None);
        };
        Ok(Some(OverrideRecord {
            last_checked: raw.last_checked,
        }))
    }
}
