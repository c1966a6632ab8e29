//! Per-resolution-run feed session

use crate::config::Config;
use crate::error::LarderResult;
use crate::feeds::iface_config::{InterfaceConfig, InterfaceConfigLoader};
use crate::feeds::locator::FeedLocator;
use crate::feeds::overrides::{OverrideRecord, OverrideStore};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Accumulates which feeds one resolution run consulted.
///
/// Created once per run and discarded afterwards; `feeds_used` grows
/// monotonically and is read at the end of the run. Lookups from parallel
/// workers may interleave; only final set membership matters.
pub struct FeedSession {
    locator: FeedLocator,
    overrides: Arc<dyn OverrideStore>,
    iface_loader: InterfaceConfigLoader,
    feeds_used: Mutex<HashSet<String>>,
}

impl FeedSession {
    pub fn new(config: &Config, overrides: Arc<dyn OverrideStore>) -> Self {
        Self {
            locator: FeedLocator::new(config),
            overrides,
            iface_loader: InterfaceConfigLoader::new(),
            feeds_used: Mutex::new(HashSet::new()),
        }
    }

    /// Session with explicit parts (tests)
    pub fn with_parts(
        locator: FeedLocator,
        overrides: Arc<dyn OverrideStore>,
        iface_loader: InterfaceConfigLoader,
    ) -> Self {
        Self {
            locator,
            overrides,
            iface_loader,
            feeds_used: Mutex::new(HashSet::new()),
        }
    }

    /// Look up a feed's cached path, recording the consultation whether or
    /// not the feed was found.
    pub async fn get_feed(&self, uri: &str) -> LarderResult<Option<PathBuf>> {
        self.feeds_used.lock().await.insert(uri.to_string());
        self.locator.cached_path(uri).await
    }

    /// Pass-through override lookup; no usage tracking
    pub async fn get_feed_overrides(&self, uri: &str) -> LarderResult<Option<OverrideRecord>> {
        self.overrides.load(uri).await
    }

    /// Pass-through interface config load; no usage tracking
    pub async fn get_iface_config(
        &self,
        uri: &str,
        known_site_feeds: &HashSet<String>,
    ) -> LarderResult<InterfaceConfig> {
        self.iface_loader.load(uri, known_site_feeds).await
    }

    /// Snapshot of every feed identifier consulted so far
    pub async fn feeds_used(&self) -> HashSet<String> {
        self.feeds_used.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct NoOverrides;

    #[async_trait]
    impl OverrideStore for NoOverrides {
        async fn load(&self, _uri: &str) -> LarderResult<Option<OverrideRecord>> {
            Ok(None)
        }
    }

    fn session(temp: &TempDir) -> FeedSession {
        FeedSession::with_parts(
            FeedLocator::with_roots(vec![temp.path().to_path_buf()]),
            Arc::new(NoOverrides),
            InterfaceConfigLoader::with_root(temp.path().to_path_buf()),
        )
    }

    #[tokio::test]
    async fn records_hits_and_misses() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp);

        // A local feed (always found) and a missing remote feed
        let found = session.get_feed("/etc/hostname").await.unwrap();
        assert!(found.is_some());
        let missing = session
            .get_feed("https://example.com/absent.xml")
            .await
            .unwrap();
        assert!(missing.is_none());

        let used = session.feeds_used().await;
        assert_eq!(used.len(), 2);
        assert!(used.contains("/etc/hostname"));
        assert!(used.contains("https://example.com/absent.xml"));
    }

    #[tokio::test]
    async fn repeated_lookups_deduplicate() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp);

        for _ in 0..3 {
            session
                .get_feed("https://example.com/tool.xml")
                .await
                .unwrap();
        }
        assert_eq!(session.feeds_used().await.len(), 1);
    }

    #[tokio::test]
    async fn pass_through_lookups_do_not_track() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp);

        session
            .get_feed_overrides("https://example.com/tool.xml")
            .await
            .unwrap();
        session
            .get_iface_config("https://example.com/tool.xml", &HashSet::new())
            .await
            .unwrap();
        assert!(session.feeds_used().await.is_empty());
    }
}
