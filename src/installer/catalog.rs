//! Toolchain packages and the per-backend routine tables.
//!
//! Each requested identifier resolves to a `ToolPackage`, and each backend
//! maps the packages it can provide to a `Routine`. A package missing from a
//! backend's table is unsupported on that host.

use crate::host::Backend;
use std::collections::HashMap;
use std::fmt;

/// Packages the kernel build needs, installed in this order by default
pub const DEFAULT_PACKAGES: &[&str] = &[
    "make",
    "x86_64-elf-binutils",
    "x86_64-elf-gcc",
    "nasm",
    "xorriso",
    "grub2",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolPackage {
    Make,
    Gcc,
    Gpp,
    CrossBinutils,
    CrossGcc,
    Nasm,
    Xorriso,
    Grub2,
}

impl ToolPackage {
    pub const ALL: [ToolPackage; 8] = [
        ToolPackage::Make,
        ToolPackage::Gcc,
        ToolPackage::Gpp,
        ToolPackage::CrossBinutils,
        ToolPackage::CrossGcc,
        ToolPackage::Nasm,
        ToolPackage::Xorriso,
        ToolPackage::Grub2,
    ];

    /// Canonical identifier
    pub fn id(&self) -> &'static str {
        match self {
            ToolPackage::Make => "make",
            ToolPackage::Gcc => "gcc",
            ToolPackage::Gpp => "g++",
            ToolPackage::CrossBinutils => "x86_64-elf-binutils",
            ToolPackage::CrossGcc => "x86_64-elf-gcc",
            ToolPackage::Nasm => "nasm",
            ToolPackage::Xorriso => "xorriso",
            ToolPackage::Grub2 => "grub2",
        }
    }

    /// Resolve an identifier or one of its aliases
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim().to_lowercase();
        let package = match id.as_str() {
            "make" => ToolPackage::Make,
            "gcc" => ToolPackage::Gcc,
            "g++" | "gpp" => ToolPackage::Gpp,
            "x86_64-elf-binutils" | "x86_64_elf_binutils" | "cross-binutils" => {
                ToolPackage::CrossBinutils
            }
            "x86_64-elf-gcc" | "x86_64_elf_gcc" | "cross-gcc" => ToolPackage::CrossGcc,
            "nasm" => ToolPackage::Nasm,
            "xorriso" => ToolPackage::Xorriso,
            "grub2" | "grub" => ToolPackage::Grub2,
            _ => return None,
        };
        Some(package)
    }
}

impl fmt::Display for ToolPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Detects an already-built tool: `<program> --version` output contains `marker`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolProbe {
    pub program: &'static str,
    pub marker: &'static str,
}

/// A bundled build script, relative to the scripts directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildScript {
    pub interpreter: &'static str,
    pub path: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routine {
    /// Install or upgrade each manager package, in order
    Managed { packages: &'static [&'static str] },

    /// Build from source unless the probe finds the tool already built
    FromSource {
        probe: ToolProbe,
        build_deps: &'static [&'static str],
        script: BuildScript,
    },
}

impl Routine {
    /// One-line summary for plan listings
    pub fn describe(&self) -> String {
        match self {
            Routine::Managed { packages } => format!("install or upgrade {}", packages.join(", ")),
            Routine::FromSource {
                build_deps, script, ..
            } if build_deps.is_empty() => format!("build from source with {}", script.path),
            Routine::FromSource {
                build_deps, script, ..
            } => format!(
                "build from source with {} (needs {})",
                script.path,
                build_deps.join(", ")
            ),
        }
    }
}

const fn managed(packages: &'static [&'static str]) -> Routine {
    Routine::Managed { packages }
}

const LINUX_BINUTILS: Routine = Routine::FromSource {
    probe: ToolProbe {
        program: "x86_64-elf-ld",
        marker: "GNU ld (GNU Binutils)",
    },
    build_deps: &[
        "make",
        "bison",
        "flex",
        "libgmp3-dev",
        "libmpc-dev",
        "libmpfr-dev",
        "texinfo",
    ],
    script: BuildScript {
        interpreter: "bash",
        path: "linux/install_x86_64-elf-binutils.sh",
    },
};

const LINUX_GCC: Routine = Routine::FromSource {
    probe: ToolProbe {
        program: "x86_64-elf-gcc",
        marker: "x86_64-elf-gcc (GCC)",
    },
    build_deps: &[],
    script: BuildScript {
        interpreter: "bash",
        path: "linux/install_x86_64-elf-gcc.sh",
    },
};

const MAC_GRUB2: Routine = Routine::FromSource {
    probe: ToolProbe {
        program: "grub-mkrescue",
        marker: "grub-mkrescue (GRUB) 2.",
    },
    build_deps: &[
        "pkg-config",
        "m4",
        "libtool",
        "automake",
        "autoconf",
        "objconv",
        "gawk",
    ],
    script: BuildScript {
        interpreter: "sh",
        path: "mac/install_grub2.sh",
    },
};

/// Routine for every package the backend can provide
pub fn routine_table(backend: Backend) -> HashMap<ToolPackage, Routine> {
    let entries: Vec<(ToolPackage, Routine)> = match backend {
        Backend::Apt => vec![
            (ToolPackage::Make, managed(&["make"])),
            (ToolPackage::Gcc, managed(&["gcc"])),
            (ToolPackage::Gpp, managed(&["g++"])),
            (ToolPackage::CrossBinutils, LINUX_BINUTILS),
            (ToolPackage::CrossGcc, LINUX_GCC),
            (ToolPackage::Nasm, managed(&["nasm"])),
            (ToolPackage::Xorriso, managed(&["xorriso"])),
            (ToolPackage::Grub2, managed(&["grub2-common", "grub-pc-bin"])),
        ],
        Backend::Homebrew => vec![
            (ToolPackage::Make, managed(&["make"])),
            (ToolPackage::Gcc, managed(&["gcc"])),
            (ToolPackage::Gpp, managed(&["g++"])),
            (ToolPackage::CrossBinutils, managed(&["x86_64-elf-binutils"])),
            (ToolPackage::CrossGcc, managed(&["x86_64-elf-gcc"])),
            (ToolPackage::Nasm, managed(&["nasm"])),
            (ToolPackage::Xorriso, managed(&["xorriso"])),
            (ToolPackage::Grub2, MAC_GRUB2),
        ],
    };
    entries.into_iter().collect()
}
