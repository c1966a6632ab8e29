//! Feed staleness decisions
//!
//! Combines cache presence, per-feed last-checked timestamps, a fixed
//! retry-suppression window and the user's freshness threshold into one
//! boolean: does this feed need re-checking?

use crate::config::{Config, ConfigManager, CONFIG_PROG, CONFIG_SITE};
use crate::error::{LarderError, LarderResult};
use crate::feeds::escape::pretty_escape;
use crate::feeds::locator::{is_local_feed, FeedLocator};
use crate::feeds::overrides::OverrideStore;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tracing::debug;

/// Suppression window after a check attempt, in seconds. A feed whose last
/// attempt is younger than this is never reported stale, so a failing feed
/// does not get hammered.
pub const FAILED_CHECK_DELAY_SECS: i64 = 60 * 60;

/// Synthetic distribution pseudo-feeds live only in memory and are never
/// re-checked.
pub const DISTRIBUTION_PREFIX: &str = "distribution:";

/// Decides whether a feed identifier needs re-checking.
pub struct StalenessEngine {
    locator: FeedLocator,
    overrides: Arc<dyn OverrideStore>,
    /// Root holding the `last-check-attempt` stamp files
    attempt_root: PathBuf,
}

impl StalenessEngine {
    /// Engine over the configured cache roots; attempt stamps live under the
    /// primary (user) root.
    pub fn new(config: &Config, overrides: Arc<dyn OverrideStore>) -> Self {
        let attempt_root = ConfigManager::cache_roots(config)
            .into_iter()
            .next()
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            locator: FeedLocator::new(config),
            overrides,
            attempt_root,
        }
    }

    /// Engine with explicit parts (tests)
    pub fn with_parts(
        locator: FeedLocator,
        overrides: Arc<dyn OverrideStore>,
        attempt_root: PathBuf,
    ) -> Self {
        Self {
            locator,
            overrides,
            attempt_root,
        }
    }

    fn attempt_stamp_path(&self, uri: &str) -> PathBuf {
        self.attempt_root
            .join(CONFIG_SITE)
            .join(CONFIG_PROG)
            .join("last-check-attempt")
            .join(pretty_escape(uri))
    }

    /// When a check of `uri` was last attempted, if ever.
    ///
    /// The stamp file's mtime IS the timestamp; its content is not read.
    pub async fn last_check_attempt(&self, uri: &str) -> LarderResult<Option<i64>> {
        let path = self.attempt_stamp_path(uri);
        match fs::metadata(&path).await {
            Ok(meta) => Ok(Some(crate::cache::mtime_secs(&meta))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LarderError::io(
                format!("statting check-attempt stamp {}", path.display()),
                e,
            )),
        }
    }

    /// Record that a check of `uri` is being attempted now.
    pub async fn mark_check_attempt(&self, uri: &str) -> LarderResult<()> {
        let path = self.attempt_stamp_path(uri);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| LarderError::io("creating check-attempt directory", e))?;
        }
        fs::write(&path, b"")
            .await
            .map_err(|e| LarderError::io(format!("touching stamp {}", path.display()), e))
    }

    async fn attempted_recently(&self, uri: &str, now: i64) -> LarderResult<bool> {
        Ok(match self.last_check_attempt(uri).await? {
            Some(attempt) => attempt > now - FAILED_CHECK_DELAY_SECS,
            None => false,
        })
    }

    /// Does `uri` need re-checking?
    pub async fn is_stale(&self, config: &Config, uri: &str) -> LarderResult<bool> {
        if uri.starts_with(DISTRIBUTION_PREFIX) {
            return Ok(false);
        }
        // Local feeds are authoritative; no remote check applies
        if is_local_feed(uri) {
            return Ok(false);
        }

        let now = Utc::now().timestamp();
        if self.attempted_recently(uri, now).await? {
            debug!("Not checking {uri}: attempted recently");
            return Ok(false);
        }

        if self.locator.cached_path(uri).await?.is_none() {
            debug!("Feed {uri} not cached, must fetch");
            return Ok(true);
        }

        let record = self.overrides.load(uri).await?;
        let Some(last_checked) = record.and_then(|r| r.last_checked) else {
            debug!("Feed {uri} never verified, must check");
            return Ok(true);
        };

        let Some(freshness) = config.freshness() else {
            debug!("Feed checking disabled by configuration");
            return Ok(false);
        };

        let staleness = now - last_checked;
        if staleness >= freshness as i64 {
            // The suppression gate is applied a second time on the
            // needs-check branch; an attempt stamp written between the two
            // probes (by a parallel worker) still suppresses the check.
            if self.attempted_recently(uri, now).await? {
                debug!("Feed {uri} is stale but was attempted recently");
                return Ok(false);
            }
            debug!("Feed {uri} is stale ({staleness}s old)");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
