//! Installation checking: quick-test fast path plus distribution fallback

use crate::cache::mtime_secs;
use crate::config::Config;
use crate::distro::{HostState, InstallState};
use crate::error::{LarderError, LarderResult};
use crate::selection::Selection;
use tokio::fs;
use tracing::debug;

/// Public entry point for "is this selection installed?".
///
/// Selections carrying a quick-test proof are answered from a single stat
/// without ever touching (or even constructing) the distribution backend;
/// everything else delegates to the process's selected backend.
pub struct InstallationChecker<'a> {
    host: &'a HostState,
}

impl<'a> InstallationChecker<'a> {
    /// Create a checker backed by the process's host state
    pub fn new(host: &'a HostState) -> Self {
        Self { host }
    }

    /// Check whether `selection` is installed on the host.
    pub async fn is_installed(
        &self,
        config: &Config,
        selection: &Selection,
    ) -> LarderResult<InstallState> {
        if let Some(file) = &selection.quick_test_file {
            let meta = match fs::metadata(file).await {
                Ok(meta) => meta,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!("Quick-test file {} missing", file.display());
                    return Ok(InstallState::NotInstalled);
                }
                Err(e) => {
                    return Err(LarderError::io(
                        format!("statting quick-test file {}", file.display()),
                        e,
                    ))
                }
            };

            return Ok(match selection.quick_test_mtime {
                // Existence alone is the recorded proof
                None => InstallState::Installed,
                Some(expected) if mtime_secs(&meta) == expected => InstallState::Installed,
                Some(expected) => {
                    debug!(
                        "Quick-test mtime {} != expected {} for {}",
                        mtime_secs(&meta),
                        expected,
                        file.display()
                    );
                    InstallState::NotInstalled
                }
            });
        }

        let distro = self.host.distribution(config).await?;
        distro.is_installed(selection).await
    }
}
