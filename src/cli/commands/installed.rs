//! Installed command - check a selection against the host

use crate::checker::InstallationChecker;
use crate::cli::args::InstalledArgs;
use crate::config::Config;
use crate::distro::{HostState, InstallState};
use crate::error::LarderResult;
use crate::selection::Selection;
use console::style;

/// Execute the installed command
pub async fn execute(args: InstalledArgs, config: &Config) -> LarderResult<()> {
    let selection = Selection {
        id: args.id,
        package: args.package,
        quick_test_file: args.quick_test_file,
        quick_test_mtime: args.quick_test_mtime,
        arch: None,
    };

    let host = HostState::new();
    let checker = InstallationChecker::new(&host);

    match checker.is_installed(config, &selection).await? {
        InstallState::Installed => {
            println!("{} {}", style("installed").green().bold(), selection.id);
        }
        InstallState::NotInstalled => {
            println!("{} {}", style("not installed").red().bold(), selection.id);
        }
        InstallState::CacheStale => {
            println!(
                "{} {} (package cache cannot answer; regenerate it and retry)",
                style("unknown").yellow().bold(),
                selection.id
            );
        }
    }

    Ok(())
}
