//! Debian-family adapter backed by a validated dpkg status cache

use crate::cache::{CacheLookup, ValidatedCache};
use crate::distro::{Distribution, InstallState};
use crate::error::LarderResult;
use crate::selection::Selection;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Cache format version. Bump whenever the key/value semantics of the dpkg
/// status cache change; the validity probe then rejects every existing cache
/// file in one stroke.
pub const DPKG_CACHE_FORMAT: i64 = 2;

/// Debian-like backend.
///
/// Owns a [`ValidatedCache`] mirroring the dpkg status file. Each cached
/// entry maps a package name to `"<version>\t<machine>"`.
pub struct DebianDistribution {
    cache: ValidatedCache,
}

impl DebianDistribution {
    /// Open the adapter over `status_path`, loading `cache_path` eagerly.
    pub async fn open(status_path: PathBuf, cache_path: PathBuf) -> LarderResult<Self> {
        let cache = ValidatedCache::open(status_path, cache_path, DPKG_CACHE_FORMAT).await?;
        Ok(Self { cache })
    }
}

#[async_trait]
impl Distribution for DebianDistribution {
    async fn is_installed(&self, selection: &Selection) -> LarderResult<InstallState> {
        let Some(package) = &selection.package else {
            warn!("Selection {} has no package attribute", selection.id);
            return Ok(InstallState::NotInstalled);
        };

        match self.cache.get(package).await? {
            CacheLookup::Hit(value) => {
                let Some((version, machine)) = value.split_once('\t') else {
                    debug!("Malformed dpkg cache entry for {package}: {value:?}");
                    return Ok(InstallState::CacheStale);
                };
                // Strict byte-for-byte comparison against the recorded id;
                // no version normalisation.
                let installed_id = format!("package:deb:{package}:{version}:{machine}");
                if installed_id == selection.id {
                    Ok(InstallState::Installed)
                } else {
                    debug!(
                        "Installed {} does not match selected {}",
                        installed_id, selection.id
                    );
                    Ok(InstallState::NotInstalled)
                }
            }
            // A missing key and a stale cache both mean "cannot answer now":
            // the resolver regenerates the cache or queries dpkg directly.
            CacheLookup::Miss => {
                debug!("{package} not in dpkg status cache");
                Ok(InstallState::CacheStale)
            }
            CacheLookup::Stale(reason) => {
                debug!("dpkg status cache is stale: {reason}");
                Ok(InstallState::CacheStale)
            }
        }
    }

    fn name(&self) -> &'static str {
        "debian"
    }
}
