//! Config command - show configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::LarderResult;

/// Execute the config command
pub async fn execute(args: ConfigArgs, config: &Config) -> LarderResult<()> {
    let manager = ConfigManager::new();

    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => show_path(&manager),
    }

    Ok(())
}

fn show_config(config: &Config) -> LarderResult<()> {
    let toml = toml::to_string_pretty(config)?;
    println!("{toml}");
    Ok(())
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}
