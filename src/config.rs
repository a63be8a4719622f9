//! Run settings resolved from the command line and environment.

use crate::cli::args::Cli;
use crate::installer::DEFAULT_PACKAGES;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub assume_yes: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub list_only: bool,
    /// Directory the bundled build scripts are resolved against
    pub scripts_dir: PathBuf,
    /// Requested package identifiers, in install order
    pub packages: Vec<String>,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Self {
        let packages = if cli.packages.is_empty() {
            DEFAULT_PACKAGES.iter().map(|p| p.to_string()).collect()
        } else {
            cli.packages.clone()
        };

        Self {
            assume_yes: cli.global.yes,
            quiet: cli.global.quiet,
            verbose: cli.global.verbose,
            list_only: cli.list,
            scripts_dir: cli.scripts_dir.clone(),
            packages,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assume_yes: false,
            quiet: false,
            verbose: false,
            list_only: false,
            scripts_dir: PathBuf::from("."),
            packages: DEFAULT_PACKAGES.iter().map(|p| p.to_string()).collect(),
        }
    }
}
