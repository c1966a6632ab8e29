//! Error types for Larder
//!
//! All modules use `LarderResult<T>` as their return type.
//!
//! A stale cache is deliberately NOT an error: staleness is a value-level
//! outcome (`CacheLookup::Stale`, `InstallState::CacheStale`) so callers are
//! forced to handle the fallback path. Only genuine faults (I/O, malformed
//! config) surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Larder operations
pub type LarderResult<T> = Result<T, LarderError>;

/// All errors that can occur in Larder
#[derive(Error, Debug)]
pub enum LarderError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // Interface config errors
    #[error("Failed to load interface config for {uri}: {reason}")]
    InterfaceConfig { uri: String, reason: String },

    #[error("Unknown stability policy: {0}")]
    UnknownStability(String),

    // Feed errors
    #[error("Malformed escaped feed name: {0}")]
    MalformedName(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl LarderError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Wrap an error with the interface URI it occurred for
    pub fn iface_config(uri: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::InterfaceConfig {
            uri: uri.into(),
            reason: reason.to_string(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ConfigInvalid { .. } => Some("Check the TOML syntax of your config file"),
            Self::UnknownStability(_) => {
                Some("Valid stability policies are: stable, testing, developer")
            }
            _ => None,
        }
    }
}
