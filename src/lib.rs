pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod installer;
pub mod packages;
pub mod ui;
pub mod utils;

use clap::Parser;
use config::Settings;
use error::SetupError;

/// Run the hydra-setup CLI entrypoint and return the process exit code.
pub fn run_cli() -> i32 {
    // 0. Initialize color settings (must be first)
    ui::init_colors();

    // 1. Signal Handling: the running child gets the signal too; stop before the next package
    if let Err(e) = ctrlc::set_handler(move || {
        println!();
        ui::mark_interrupted();
        ui::warning("Operation cancelled by user.");
    }) {
        ui::warning(&format!("could not install Ctrl-C handler: {}", e));
    }

    // 2. Parse & Run
    let args = cli::args::Cli::parse();
    let settings = Settings::from_cli(&args);
    ui::set_quiet(settings.quiet);
    ui::set_verbose(settings.verbose);

    let result = cli::dispatcher::dispatch(&settings);
    if let Err(e) = &result {
        report(e);
    }
    cli::dispatcher::exit_code(&result)
}

fn report(err: &SetupError) {
    // Already printed by the host check, together with any hint
    if matches!(err, SetupError::UnsupportedPlatform { .. }) {
        return;
    }

    ui::error(&err.to_string());

    if ui::is_verbose() {
        let mut source = std::error::Error::source(err);
        while let Some(cause) = source {
            ui::indent(&format!("caused by: {}", cause), 1);
            source = std::error::Error::source(cause);
        }
    }

    ui::error("unsuccessful setup process");
}
