//! Command dispatcher
//!
//! Maps the detected host to a backend, builds the installer and runs it.

use crate::config::Settings;
use crate::error::{Result, SetupError};
use crate::host::{self, Backend, HostOs};
use crate::installer::{AssumeYes, Confirm, ConsolePrompt, Installer, ScriptHost, Step};
use crate::packages;
use crate::ui as output;
use crate::utils::sanitize;
use std::io::{self, Write};

/// Dispatch the resolved settings against the current host
pub fn dispatch(settings: &Settings) -> Result<()> {
    run_for_host(HostOs::detect(), settings)
}

/// Run the setup for an already-detected host.
///
/// Unsupported hosts and unsafe package names are rejected before any
/// installer exists.
pub fn run_for_host(os: HostOs, settings: &Settings) -> Result<()> {
    let backend = announce_host(os, &mut io::stdout())?;
    sanitize::validate_package_names(settings.packages.as_slice())?;

    let confirm: Box<dyn Confirm> = if settings.assume_yes {
        Box::new(AssumeYes)
    } else {
        Box::new(ConsolePrompt)
    };

    let mut installer = Installer::new(
        packages::create_manager(backend),
        Box::new(ScriptHost::new(&settings.scripts_dir)),
        confirm,
        settings.packages.as_slice(),
    );

    if settings.list_only {
        return print_plan(&installer);
    }

    output::info("installing packages");
    installer.install()
}

/// Print the detected host and select its backend.
///
/// A rejected host gets its hint and the final `error:` line here; the
/// entrypoint does not report `UnsupportedPlatform` again.
pub fn announce_host<W: Write>(os: HostOs, out: &mut W) -> Result<Backend> {
    if os != HostOs::Unknown && !output::is_quiet() {
        let _ = output::write_info(out, &format!("host os \"{}\" detected", os));
    }

    host::select_backend(os).inspect_err(|err| {
        if let Some(hint) = host::unsupported_hint(os) {
            let _ = output::write_warning(out, hint);
        }
        let _ = output::write_error(out, &err.to_string());
    })
}

fn print_plan(installer: &Installer) -> Result<()> {
    output::header(&format!("Packages to set up with {}", installer.manager_name()));

    let mut unsupported = None;
    for step in installer.steps() {
        match step {
            Step::Run { id, routine } => {
                output::indent(&format!("{:<22} {}", id, routine.describe()), 1)
            }
            Step::Unsupported { id } => {
                output::indent(&format!("{:<22} not available on this host", id), 1);
                unsupported.get_or_insert_with(|| id.clone());
            }
        }
    }

    match unsupported {
        Some(package) => Err(SetupError::ConfigError(format!(
            "package {} can not be installed with {}",
            package,
            installer.manager_name()
        ))),
        None => Ok(()),
    }
}

/// Process exit code for a finished run
pub fn exit_code(result: &Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}
