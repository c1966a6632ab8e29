//! Feed location, staleness and per-run usage tracking
//!
//! A feed is a manifest describing available versions of a component,
//! identified by an absolute local path or a remote URI. This module finds
//! cached copies across the configured cache roots, reads per-interface
//! user overrides, and decides when a cached feed is old enough to be worth
//! re-fetching. Fetching itself lives elsewhere.

pub mod escape;
pub mod iface_config;
pub mod locator;
pub mod overrides;
pub mod session;
pub mod staleness;

pub use escape::{escape, pretty_escape, pretty_unescape, unescape};
pub use iface_config::{FeedImport, InterfaceConfig, InterfaceConfigLoader, StabilityPolicy};
pub use locator::{is_local_feed, FeedLocator};
pub use overrides::{FsOverrideStore, OverrideRecord, OverrideStore};
pub use session::FeedSession;
pub use staleness::{StalenessEngine, DISTRIBUTION_PREFIX, FAILED_CHECK_DELAY_SECS};
