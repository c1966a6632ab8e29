//! Stale command - report whether a cached feed needs re-checking

use crate::config::Config;
use crate::error::LarderResult;
use crate::feeds::{FsOverrideStore, StalenessEngine};
use console::style;
use std::sync::Arc;

/// Execute the stale command
pub async fn execute(uri: &str, config: &Config) -> LarderResult<()> {
    let engine = StalenessEngine::new(config, Arc::new(FsOverrideStore::new()));

    if engine.is_stale(config, uri).await? {
        println!("{} {uri}", style("stale").yellow().bold());
    } else {
        println!("{} {uri}", style("fresh").green().bold());
    }

    Ok(())
}
