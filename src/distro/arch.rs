//! Stub adapter for Arch-like hosts

use crate::distro::{Distribution, InstallState};
use crate::error::LarderResult;
use crate::selection::Selection;
use async_trait::async_trait;
use tracing::info;

/// Placeholder backend for pacman-managed hosts.
///
/// Selections that reach this path predate quick-test attributes and are
/// treated as stale by policy: reporting "not installed" forces the resolver
/// to refresh them. A real pacman database reader should replace this stub.
pub struct ArchDistribution;

#[async_trait]
impl Distribution for ArchDistribution {
    async fn is_installed(&self, selection: &Selection) -> LarderResult<InstallState> {
        info!(
            "Forcing update of {}: selection predates quick-test support",
            selection.id
        );
        Ok(InstallState::NotInstalled)
    }

    fn name(&self) -> &'static str {
        "arch"
    }
}
