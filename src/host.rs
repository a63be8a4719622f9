//! Host detection and backend selection
//!
//! The host is probed exactly once at process start (`HostOs::detect`);
//! everything downstream works from the resulting value, so the selection
//! logic itself stays a pure function.

use crate::error::{Result, SetupError};
use std::fmt;

/// Operating system family of the machine running the setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    MacOs,
    Linux,
    Windows,
    Unknown,
}

impl HostOs {
    /// Detect the current host from the compile target
    pub fn detect() -> Self {
        Self::from_os_str(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` style tag to a host family
    pub fn from_os_str(os: &str) -> Self {
        match os {
            "macos" => HostOs::MacOs,
            "linux" => HostOs::Linux,
            "windows" => HostOs::Windows,
            _ => HostOs::Unknown,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            HostOs::MacOs => "MacOS",
            HostOs::Linux => "Linux",
            HostOs::Windows => "Windows",
            HostOs::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Native package manager the installer drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Apt,
    Homebrew,
}

impl Backend {
    /// Name of the manager as shown to the operator
    pub fn manager_name(&self) -> &'static str {
        match self {
            Backend::Apt => "apt",
            Backend::Homebrew => "homebrew",
        }
    }

    /// Platform name used in "can not be installed on ..." diagnostics
    pub fn platform_name(&self) -> &'static str {
        match self {
            Backend::Apt => "Linux",
            Backend::Homebrew => "MacOS",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.manager_name())
    }
}

/// Pick the package manager backend for a host.
///
/// Windows and unknown hosts are rejected; nothing else is probed.
pub fn select_backend(os: HostOs) -> Result<Backend> {
    match os {
        HostOs::MacOs => Ok(Backend::Homebrew),
        HostOs::Linux => Ok(Backend::Apt),
        HostOs::Windows | HostOs::Unknown => Err(SetupError::UnsupportedPlatform {
            os: os.display_name().to_string(),
        }),
    }
}

/// Remediation hint printed for a rejected host, if there is one
pub fn unsupported_hint(os: HostOs) -> Option<&'static str> {
    match os {
        HostOs::Windows => Some("please use wsl2 to build HydraOS"),
        _ => None,
    }
}

/// The only Linux distribution the apt backend supports
pub const SUPPORTED_DISTRIBUTION: &str = "Ubuntu";

/// Check `lsb_release -is` output against the supported distribution
pub fn is_supported_distribution(lsb_release_id: &str) -> bool {
    lsb_release_id.trim() == SUPPORTED_DISTRIBUTION
}
