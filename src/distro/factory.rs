//! Distribution detection and one-time backend selection
//!
//! The choice of package-database adapter is made at most once per process,
//! from the OS family plus filesystem probes of well-known database paths,
//! and memoized for all later installation checks.

use crate::config::{Config, ConfigManager, CONFIG_PROG, CONFIG_SITE};
use crate::distro::arch::ArchDistribution;
use crate::distro::debian::DebianDistribution;
use crate::distro::generic::GenericDistribution;
use crate::distro::Distribution;
use crate::error::LarderResult;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::OnceCell;
use tracing::debug;

/// Debian-family package status database
pub const DPKG_STATUS_PATH: &str = "/var/lib/dpkg/status";

/// Arch-family local package database directory
pub const PACMAN_DB_PATH: &str = "/var/lib/pacman/local";

/// Detected OS family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    /// POSIX-like: probe for native package databases
    Unix,
    /// Windows-like: no native adapter, always generic
    Windows,
    /// Anything else: always generic
    Other,
}

impl OsFamily {
    /// Detect the current OS family
    pub fn detect() -> Self {
        match std::env::consts::FAMILY {
            "unix" => OsFamily::Unix,
            "windows" => OsFamily::Windows,
            _ => OsFamily::Other,
        }
    }

    /// Get a human-readable family name
    pub fn name(&self) -> &'static str {
        match self {
            OsFamily::Unix => "unix",
            OsFamily::Windows => "windows",
            OsFamily::Other => "other",
        }
    }
}

/// Filesystem locations probed during detection, injectable for tests.
#[derive(Debug, Clone)]
pub struct DistroProbes {
    /// dpkg status file; selected when it exists with non-zero size
    pub dpkg_status: PathBuf,
    /// pacman local database directory; selected when it exists
    pub pacman_db: PathBuf,
    /// Where the dpkg status cache file lives
    pub dpkg_cache: PathBuf,
}

impl DistroProbes {
    /// Well-known paths, with the dpkg cache under the primary cache root
    pub fn for_config(config: &Config) -> Self {
        let root = ConfigManager::cache_roots(config)
            .into_iter()
            .next()
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            dpkg_status: PathBuf::from(DPKG_STATUS_PATH),
            pacman_db: PathBuf::from(PACMAN_DB_PATH),
            dpkg_cache: root
                .join(CONFIG_SITE)
                .join(CONFIG_PROG)
                .join("dpkg-status.cache"),
        }
    }
}

/// Select a distribution backend. Priority order is fixed: Debian before
/// Arch before Generic; non-POSIX hosts always get Generic.
pub async fn create_distribution(
    family: OsFamily,
    probes: &DistroProbes,
) -> LarderResult<Arc<dyn Distribution>> {
    if family != OsFamily::Unix {
        debug!("OS family {} has no native adapter", family.name());
        return Ok(Arc::new(GenericDistribution));
    }

    match fs::metadata(&probes.dpkg_status).await {
        Ok(meta) if meta.len() > 0 => {
            debug!("Selected Debian adapter ({})", probes.dpkg_status.display());
            let distro =
                DebianDistribution::open(probes.dpkg_status.clone(), probes.dpkg_cache.clone())
                    .await?;
            return Ok(Arc::new(distro));
        }
        _ => {}
    }

    if fs::metadata(&probes.pacman_db).await.is_ok() {
        debug!("Selected Arch adapter ({})", probes.pacman_db.display());
        return Ok(Arc::new(ArchDistribution));
    }

    debug!("No native package database found, using generic adapter");
    Ok(Arc::new(GenericDistribution))
}

/// Per-process host state holding the memoized distribution choice.
///
/// Threaded explicitly through callers rather than living in a global; the
/// `OnceCell` guards the one-time selection even under concurrent
/// installation checks from parallel resolver workers.
pub struct HostState {
    distro: OnceCell<Arc<dyn Distribution>>,
    probes: Option<DistroProbes>,
}

impl HostState {
    /// Host state probing the well-known database paths
    pub fn new() -> Self {
        Self {
            distro: OnceCell::new(),
            probes: None,
        }
    }

    /// Host state with explicit probe paths (tests)
    pub fn with_probes(probes: DistroProbes) -> Self {
        Self {
            distro: OnceCell::new(),
            probes: Some(probes),
        }
    }

    /// The selected distribution backend, detecting it on first use
    pub async fn distribution(&self, config: &Config) -> LarderResult<Arc<dyn Distribution>> {
        let distro = self
            .distro
            .get_or_try_init(|| async {
                let probes = match &self.probes {
                    Some(probes) => probes.clone(),
                    None => DistroProbes::for_config(config),
                };
                create_distribution(OsFamily::detect(), &probes).await
            })
            .await?;
        Ok(distro.clone())
    }
}

impl Default for HostState {
    fn default() -> Self {
        Self::new()
    }
}
