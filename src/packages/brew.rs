//! Homebrew package manager
//!
//! Installs and manages packages using Homebrew.

use crate::error::{Result, SetupError};
use crate::host::Backend;
use crate::packages::listing;
use crate::packages::traits::PackageManager;
use crate::utils::platform::{build_program_command, build_shell_command};
use crate::utils::process;
use crate::utils::sanitize;

/// Official Homebrew install script, run through bash
pub const HOMEBREW_INSTALL_COMMAND: &str = r#"/bin/bash -c "$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)""#;

pub struct BrewManager;

impl BrewManager {
    pub fn new() -> Self {
        Self
    }

    fn brew(&self, args: &[&str]) -> Result<()> {
        process::run_checked(&mut build_program_command("brew", args, false))
    }
}

impl Default for BrewManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageManager for BrewManager {
    fn backend(&self) -> Backend {
        Backend::Homebrew
    }

    fn is_available(&self) -> bool {
        which::which("brew").is_ok()
    }

    fn bootstrap(&self) -> Result<()> {
        if self.is_available() {
            return Ok(());
        }
        process::run_checked(&mut build_shell_command(HOMEBREW_INSTALL_COMMAND, false))
    }

    fn update_index(&self) -> Result<()> {
        self.brew(&["update"])
    }

    fn is_installed(&self, package: &str, version: Option<&str>) -> Result<bool> {
        sanitize::validate_package_name(package)?;

        let output = process::run_captured(&mut build_program_command(
            "brew",
            &["list", "--versions"],
            false,
        ))?;

        if !output.status.success() {
            return Err(SetupError::PackageManagerError(
                "Failed to list brew packages".into(),
            ));
        }

        let entries = listing::parse_brew_versions(&String::from_utf8_lossy(&output.stdout));
        Ok(listing::contains_package(&entries, package, version))
    }

    fn install(&self, package: &str) -> Result<()> {
        sanitize::validate_package_name(package)?;
        self.brew(&["install", package])
    }

    fn upgrade(&self, package: &str) -> Result<()> {
        sanitize::validate_package_name(package)?;
        self.brew(&["upgrade", package])
    }
}
