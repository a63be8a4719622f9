//! Input sanitization utilities
//!
//! Package names end up as process arguments (and, for sudo, in the
//! operator's audit log), so they are checked before any command is built.

use crate::error::{Result, SetupError};
use regex::Regex;
use std::sync::LazyLock;

/// Safe characters for apt and Homebrew package names
/// Allows: alphanumeric, dash, underscore, dot, plus, at sign, slash (for tapped formulae)
static SAFE_PACKAGE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9@._+/-]+$").expect("Invalid regex pattern"));

/// Characters that could be dangerous in shell contexts
static SHELL_DANGEROUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[;`$(){}|&<>\\'"\n\r\t]"#).expect("Invalid regex pattern"));

/// Validate a package name is safe to hand to the package manager
pub fn validate_package_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(SetupError::ConfigError(
            "Package name cannot be empty".to_string(),
        ));
    }

    if name.chars().count() > 256 {
        return Err(SetupError::ConfigError(format!(
            "Package name too long (max 256 chars): {}",
            name.chars().take(50).collect::<String>()
        )));
    }

    if SHELL_DANGEROUS.is_match(name) {
        return Err(SetupError::ConfigError(format!(
            "Package name contains unsafe characters: {}",
            name
        )));
    }

    if !SAFE_PACKAGE_NAME.is_match(name) {
        return Err(SetupError::ConfigError(format!(
            "Package name contains invalid characters: {}",
            name
        )));
    }

    if name.contains("..") {
        return Err(SetupError::ConfigError(format!(
            "Package name cannot contain path traversal: {}",
            name
        )));
    }

    Ok(())
}

/// Validate every requested name, stopping at the first bad one
pub fn validate_package_names<S: AsRef<str>>(names: &[S]) -> Result<()> {
    names
        .iter()
        .try_for_each(|name| validate_package_name(name.as_ref()))
}
