//! Validated on-disk key/value caching
//!
//! A `ValidatedCache` mirrors selected lines of a single source file (for
//! example the dpkg status database) into a fast key/value lookup, and
//! detects when that mirror has gone out of date.
//!
//! # Validity contract
//!
//! A cache file carries the mtime, size and format version of the source
//! file it was generated from. Every read re-stats the source and compares;
//! any mismatch means the cache cannot answer and the caller must fall back
//! to an authoritative path or trigger regeneration. The cache is read-only
//! in this crate: population is an external responsibility.

mod validated;

pub use validated::{CacheLookup, CacheRecord, ValidatedCache, Validity};

use std::time::UNIX_EPOCH;

/// File mtime truncated to integer seconds since the epoch.
///
/// Pre-epoch or unreadable mtimes collapse to 0, which can never match a
/// real cache header written from a live stat.
pub fn mtime_secs(meta: &std::fs::Metadata) -> i64 {
    meta.modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
