//! # Package Manager Adapters
//!
//! One adapter per supported host, all behind the `PackageManager` trait:
//!
//! - **APT** (`apt.rs`): Ubuntu; mutating operations go through `sudo`
//! - **Homebrew** (`brew.rs`): macOS; can bootstrap itself
//!
//! Installed-package listings are parsed in `listing.rs`.

pub mod apt;
pub mod brew;
pub mod listing;
pub mod traits;

pub use traits::PackageManager;

use crate::host::Backend;

/// Create the adapter for a backend
pub fn create_manager(backend: Backend) -> Box<dyn PackageManager> {
    match backend {
        Backend::Apt => Box::new(apt::AptManager::new()),
        Backend::Homebrew => Box::new(brew::BrewManager::new()),
    }
}
