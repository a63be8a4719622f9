use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "hydra-setup",
    about = "Install the HydraOS build toolchain",
    long_about = "Detects the host OS and installs or upgrades the HydraOS build toolchain \
                  (make, x86_64-elf binutils and gcc, nasm, xorriso, grub2) through apt or Homebrew",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    /// Packages to install instead of the default toolchain list
    #[arg(value_name = "PACKAGE")]
    pub packages: Vec<String>,

    /// Directory containing the linux/ and mac/ build scripts
    #[arg(long, value_name = "DIR", env = "HYDRA_SETUP_SCRIPTS_DIR", default_value = ".")]
    pub scripts_dir: PathBuf,

    /// Show what would be installed on this host and exit
    #[arg(long)]
    pub list: bool,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Echo every external command before running it
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Answer "yes" to every install prompt
    #[arg(short = 'y', long = "yes", global = true, env = "HYDRA_SETUP_YES")]
    pub yes: bool,
}
