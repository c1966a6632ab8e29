//! Resolving feed identifiers to cached files on disk

use crate::config::{Config, ConfigManager, CONFIG_PROG, CONFIG_SITE};
use crate::error::{LarderError, LarderResult};
use crate::feeds::escape::{escape, unescape};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// A feed identifier is local iff it is an absolute filesystem path.
/// Classification is purely syntactic; no filesystem probe.
pub fn is_local_feed(uri: &str) -> bool {
    Path::new(uri).is_absolute()
}

/// Looks up cached feeds across an ordered list of cache roots.
/// First match wins.
pub struct FeedLocator {
    roots: Vec<PathBuf>,
}

impl FeedLocator {
    /// Locator over the configured cache roots, user root first
    pub fn new(config: &Config) -> Self {
        Self {
            roots: ConfigManager::cache_roots(config),
        }
    }

    /// Locator over explicit roots (tests)
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    fn interfaces_dir(root: &Path) -> PathBuf {
        root.join(CONFIG_SITE).join(CONFIG_PROG).join("interfaces")
    }

    /// Path serving `uri`, if any.
    ///
    /// A local feed is its own cached path and is always present. A remote
    /// feed resolves to the first existing escaped entry across the roots.
    pub async fn cached_path(&self, uri: &str) -> LarderResult<Option<PathBuf>> {
        if is_local_feed(uri) {
            return Ok(Some(PathBuf::from(uri)));
        }

        let name = escape(uri);
        for root in &self.roots {
            let path = Self::interfaces_dir(root).join(&name);
            if fs::metadata(&path).await.is_ok() {
                debug!("Feed {uri} cached at {}", path.display());
                return Ok(Some(path));
            }
        }
        Ok(None)
    }

    /// Every feed URI with a cache entry under any root, deduplicated.
    ///
    /// A root without an `interfaces` directory contributes nothing; hidden
    /// (dot-prefixed) entries and names that do not unescape are skipped.
    pub async fn list_all_known_interfaces(&self) -> LarderResult<HashSet<String>> {
        let mut uris = HashSet::new();

        for root in &self.roots {
            let dir = Self::interfaces_dir(root);
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(LarderError::io(
                        format!("listing cache directory {}", dir.display()),
                        e,
                    ))
                }
            };

            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| LarderError::io("reading cache directory entry", e))?
            {
                let name = entry.file_name();
                let Some(name) = name.to_str() else { continue };
                if name.starts_with('.') {
                    continue;
                }
                match unescape(name) {
                    Ok(uri) => {
                        uris.insert(uri);
                    }
                    Err(e) => warn!("Skipping malformed cache entry {name}: {e}"),
                }
            }
        }

        Ok(uris)
    }
}
