//! Native package-database adapters
//!
//! Provides a trait for "is this selection installed?" that can be answered
//! by different backends (dpkg on Debian-like hosts, a stub on Arch-like
//! hosts, an optimistic default everywhere else). The backend is chosen at
//! most once per process by [`factory::HostState`].

pub mod arch;
pub mod debian;
pub mod factory;
pub mod generic;

pub use factory::{HostState, OsFamily};

use crate::error::LarderResult;
use crate::selection::Selection;
use async_trait::async_trait;

/// Answer from a distribution probe.
///
/// `CacheStale` means the backing package cache could not answer; the
/// resolver must regenerate the cache or query the database directly, then
/// retry. It must never be read as "not installed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    /// The selection is installed (or assumed so by a stub backend)
    Installed,
    /// The selection is not installed
    NotInstalled,
    /// The package cache cannot answer right now
    CacheStale,
}

/// Abstract native package-database interface
///
/// Add new package-manager families as new implementations, never by
/// widening an existing one.
#[async_trait]
pub trait Distribution: Send + Sync {
    /// Check whether the selected component is installed on the host
    async fn is_installed(&self, selection: &Selection) -> LarderResult<InstallState>;

    /// Human-readable backend name for diagnostics
    fn name(&self) -> &'static str;
}
