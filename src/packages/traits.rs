use crate::error::Result;
use crate::host::Backend;

/// Uniform operation set over a platform's native package manager.
///
/// Every query goes to the live package database; nothing is cached between
/// calls.
pub trait PackageManager {
    fn backend(&self) -> Backend;

    /// Is the package manager usable on this host?
    fn is_available(&self) -> bool;

    /// First-time installation of the package manager itself
    fn bootstrap(&self) -> Result<()>;

    /// Refresh the package index (e.g., apt update, brew update)
    fn update_index(&self) -> Result<()>;

    /// Check whether `package` is installed, optionally at exactly `version`
    fn is_installed(&self, package: &str, version: Option<&str>) -> Result<bool>;

    fn install(&self, package: &str) -> Result<()>;

    fn upgrade(&self, package: &str) -> Result<()>;

    fn name(&self) -> &'static str {
        self.backend().manager_name()
    }
}
