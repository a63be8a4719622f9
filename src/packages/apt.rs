//! APT package manager (Ubuntu)

use crate::error::{Result, SetupError};
use crate::host::{self, Backend};
use crate::packages::listing;
use crate::packages::traits::PackageManager;
use crate::utils::platform::build_program_command;
use crate::utils::process;
use crate::utils::sanitize;

pub struct AptManager;

impl AptManager {
    pub fn new() -> Self {
        Self
    }

    /// Run `sudo apt <args...>`
    fn apt(&self, args: &[&str]) -> Result<()> {
        process::run_checked(&mut build_program_command("apt", args, true))
    }
}

impl Default for AptManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageManager for AptManager {
    fn backend(&self) -> Backend {
        Backend::Apt
    }

    fn is_available(&self) -> bool {
        match process::run_captured(&mut build_program_command("lsb_release", &["-is"], false)) {
            Ok(output) => host::is_supported_distribution(&String::from_utf8_lossy(&output.stdout)),
            Err(_) => false,
        }
    }

    fn bootstrap(&self) -> Result<()> {
        Err(SetupError::PackageManagerError(format!(
            "this setup is intended for {} systems only",
            host::SUPPORTED_DISTRIBUTION
        )))
    }

    fn update_index(&self) -> Result<()> {
        self.apt(&["update"])
    }

    fn is_installed(&self, package: &str, version: Option<&str>) -> Result<bool> {
        sanitize::validate_package_name(package)?;

        // dpkg exits non-zero for unknown packages; the listing is simply empty then.
        let output = process::run_captured(&mut build_program_command("dpkg", &["-l", package], false))?;
        let entries = listing::parse_dpkg_list(&String::from_utf8_lossy(&output.stdout));

        Ok(listing::contains_package(&entries, package, version))
    }

    fn install(&self, package: &str) -> Result<()> {
        sanitize::validate_package_name(package)?;
        self.apt(&["install", "-y", package])
    }

    fn upgrade(&self, package: &str) -> Result<()> {
        sanitize::validate_package_name(package)?;
        self.apt(&["upgrade", "-y", package])
    }
}
