//! Parsers for installed-package listings
//!
//! Both parsers produce exact name tokens. Matching is done on whole tokens
//! so that asking for `make` never matches `automake` or `makedepend`.

use regex::Regex;
use std::sync::LazyLock;

/// One row of `dpkg -l`: two status letters (desired, current), an optional
/// error flag, then name and version columns.
static DPKG_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<desired>[a-z])(?P<state>[a-zA-Z])\S?\s+(?P<name>\S+)\s+(?P<version>\S+)")
        .expect("Invalid regex pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    pub name: String,
    pub versions: Vec<String>,
}

impl InstalledPackage {
    pub fn matches(&self, name: &str, version: Option<&str>) -> bool {
        if self.name != name {
            return false;
        }
        match version {
            None => true,
            Some(wanted) => self.versions.iter().any(|v| v == wanted),
        }
    }
}

/// Parse `dpkg -l` output, keeping only rows whose current state is installed.
///
/// Architecture qualifiers (`libmpc-dev:amd64`) are stripped from names.
pub fn parse_dpkg_list(output: &str) -> Vec<InstalledPackage> {
    output
        .lines()
        .filter_map(|line| {
            let caps = DPKG_ROW.captures(line)?;
            if &caps["state"] != "i" {
                return None;
            }
            let name = caps["name"].split(':').next().unwrap_or_default();
            Some(InstalledPackage {
                name: name.to_string(),
                versions: vec![caps["version"].to_string()],
            })
        })
        .collect()
}

/// Parse `brew list --versions` output:
/// package-name 1.2.3 1.2.4
pub fn parse_brew_versions(output: &str) -> Vec<InstalledPackage> {
    output
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let name = parts.next()?;
            Some(InstalledPackage {
                name: name.to_string(),
                versions: parts.map(str::to_string).collect(),
            })
        })
        .collect()
}

/// True if any entry is exactly `name` (and carries `version`, when given)
pub fn contains_package(entries: &[InstalledPackage], name: &str, version: Option<&str>) -> bool {
    entries.iter().any(|entry| entry.matches(name, version))
}
