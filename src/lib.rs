//! Larder - local state for a decentralised dependency resolver
//!
//! Answers two questions for the resolver: is a selected component already
//! installed on this host, and is a cached feed stale enough to re-fetch?
//! Both go through validity-checked caches so the expensive paths (parsing
//! the package database, a network round trip) are only taken when needed.

pub mod cache;
pub mod checker;
pub mod cli;
pub mod config;
pub mod distro;
pub mod error;
pub mod feeds;
pub mod selection;

pub use error::{LarderError, LarderResult};
