//! Fallback adapter for hosts with no supported package database

use crate::distro::{Distribution, InstallState};
use crate::error::LarderResult;
use crate::selection::Selection;
use async_trait::async_trait;
use tracing::warn;

/// Optimistic default backend.
///
/// Has no database to consult, so it assumes everything is installed and
/// says so in the log. Callers needing a verified answer must run on a host
/// where a specific adapter gets selected.
pub struct GenericDistribution;

#[async_trait]
impl Distribution for GenericDistribution {
    async fn is_installed(&self, selection: &Selection) -> LarderResult<InstallState> {
        warn!(
            "No package database adapter for this platform; assuming {} is installed",
            selection.id
        );
        Ok(InstallState::Installed)
    }

    fn name(&self) -> &'static str {
        "generic"
    }
}
