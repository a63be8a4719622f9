use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("unsupported host os")]
    UnsupportedPlatform { os: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The operator answered "no" to a prompt
    #[error("declined: {0}")]
    Declined(String),

    #[error("failed to update {manager}")]
    UpdateFailed {
        manager: String,
        #[source]
        source: Box<SetupError>,
    },

    #[error("failed to bootstrap {manager}")]
    BootstrapFailed {
        manager: String,
        #[source]
        source: Box<SetupError>,
    },

    #[error("failed to {action} package \"{package}\"")]
    PackageOperationFailed {
        action: &'static str,
        package: String,
        #[source]
        source: Box<SetupError>,
    },

    #[error("package {package} can not be installed on {platform}")]
    UnsupportedPackage { package: String, platform: String },

    #[error("failed to execute installation script for {package}")]
    ScriptFailed {
        package: String,
        #[source]
        source: Box<SetupError>,
    },

    #[error("build script not found at '{}'", path.display())]
    ScriptMissing { path: PathBuf },

    #[error("Package manager error: {0}")]
    PackageManagerError(String),

    #[error("System command '{command}' failed: {reason}")]
    SystemCommandFailed { command: String, reason: String },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl SetupError {
    /// Wrap a lower-level failure with the package and action it belongs to.
    pub fn package_op(action: &'static str, package: &str, source: SetupError) -> Self {
        SetupError::PackageOperationFailed {
            action,
            package: package.to_string(),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, SetupError>;
