//! mtime/size/format-validated key/value store backed by one text file
//!
//! Disk format (UTF-8, line oriented): a header block of `key=value` lines
//! recognising exactly `mtime`, `size` and `format`, terminated by a blank
//! line, followed by `key=value` entry lines to end of file. Unrecognised
//! header keys are ignored for forward compatibility. The first `=` splits
//! key from value on every line.

use crate::cache::mtime_secs;
use crate::error::{LarderError, LarderResult};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// In-memory mirror of one cache file.
///
/// Header fields default to sentinels (`mtime=0`, `size=-1`, `rev=-1`) that
/// can never equal a real stat result, so a missing or truncated cache file
/// is invalid by construction.
#[derive(Debug, Clone)]
pub struct CacheRecord {
    /// Source-file mtime recorded at generation time, integer seconds
    pub mtime: i64,
    /// Source-file size recorded at generation time, bytes
    pub size: i64,
    /// Format version recorded at generation time
    pub rev: i64,
    /// Cached entries
    pub entries: HashMap<String, String>,
}

impl CacheRecord {
    fn empty() -> Self {
        Self {
            mtime: 0,
            size: -1,
            rev: -1,
            entries: HashMap::new(),
        }
    }
}

/// Outcome of a validity probe against the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validity {
    /// Header matches the live source file; entries may be served
    Fresh,
    /// Some header field mismatched; the reason names it
    Stale(String),
}

/// Outcome of a gated cache read.
///
/// `Stale` is control flow, not a fault: the caller must fall back to an
/// authoritative source or trigger regeneration, then retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// Key present and the cache is valid
    Hit(String),
    /// Cache is valid but the key is genuinely absent
    Miss,
    /// Cache cannot answer; carries the mismatch description
    Stale(String),
}

/// Key/value cache tied to the mtime/size/format of the file it mirrors.
pub struct ValidatedCache {
    /// File this cache mirrors (never written here)
    source: PathBuf,
    /// The cache file itself
    cache_path: PathBuf,
    /// Format version the caller compiled in
    format: i64,
    record: CacheRecord,
}

impl ValidatedCache {
    /// Open a cache over `source`, loading `cache_path` eagerly.
    ///
    /// A missing cache file is not an error; it yields an empty record with
    /// sentinel header values, which every validity probe rejects.
    pub async fn open(source: PathBuf, cache_path: PathBuf, format: i64) -> LarderResult<Self> {
        let mut cache = Self {
            source,
            cache_path,
            format,
            record: CacheRecord::empty(),
        };
        cache.load().await?;
        Ok(cache)
    }

    /// Discard in-memory state and re-parse the cache file.
    ///
    /// Does not touch the source file at all.
    async fn load(&mut self) -> LarderResult<()> {
        self.record = CacheRecord::empty();

        let content = match fs::read_to_string(&self.cache_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No cache file at {}", self.cache_path.display());
                return Ok(());
            }
            Err(e) => {
                return Err(LarderError::io(
                    format!("reading cache file {}", self.cache_path.display()),
                    e,
                ))
            }
        };

        let mut lines = content.lines();

        // Header block, up to the first blank line
        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            match key {
                "mtime" => self.record.mtime = value.parse().unwrap_or(0),
                "size" => self.record.size = value.parse().unwrap_or(-1),
                "format" => self.record.rev = value.parse().unwrap_or(-1),
                // Unknown header keys are ignored (forward compatibility)
                _ => {}
            }
        }

        // Content block, to end of file
        for line in lines {
            if let Some((key, value)) = line.split_once('=') {
                self.record.entries.insert(key.to_string(), value.to_string());
            }
        }

        debug!(
            "Loaded {} cached entries from {}",
            self.record.entries.len(),
            self.cache_path.display()
        );
        Ok(())
    }

    /// Stat the source file and compare against the loaded header.
    ///
    /// A source file that cannot be stat'd at all is an I/O fault, distinct
    /// from staleness.
    pub async fn validity(&self) -> LarderResult<Validity> {
        let meta = fs::metadata(&self.source).await.map_err(|e| {
            LarderError::io(format!("statting source file {}", self.source.display()), e)
        })?;

        if self.record.rev != self.format {
            return Ok(Validity::Stale(format!(
                "cache format {} != expected {}",
                self.record.rev, self.format
            )));
        }
        let mtime = mtime_secs(&meta);
        if self.record.mtime != mtime {
            return Ok(Validity::Stale(format!(
                "cached mtime {} != source mtime {}",
                self.record.mtime, mtime
            )));
        }
        let size = meta.len() as i64;
        if self.record.size != size {
            return Ok(Validity::Stale(format!(
                "cached size {} != source size {}",
                self.record.size, size
            )));
        }
        Ok(Validity::Fresh)
    }

    /// Validity-gated lookup. No read path bypasses the freshness probe.
    pub async fn get(&self, key: &str) -> LarderResult<CacheLookup> {
        match self.validity().await? {
            Validity::Stale(reason) => Ok(CacheLookup::Stale(reason)),
            Validity::Fresh => Ok(match self.record.entries.get(key) {
                Some(value) => CacheLookup::Hit(value.clone()),
                None => CacheLookup::Miss,
            }),
        }
    }

    /// The loaded record (tests, diagnostics)
    pub fn record(&self) -> &CacheRecord {
        &self.record
    }
}
