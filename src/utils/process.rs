//! Blocking process execution.
//!
//! No timeout is applied: a hung child blocks the whole run until it exits.

use crate::error::{Result, SetupError};
use crate::ui;
use crate::utils::platform::display_command;
use std::process::{Command, ExitStatus, Output, Stdio};

/// Run a command with the operator's terminal attached (shows real-time output)
pub fn run_interactive(cmd: &mut Command) -> Result<ExitStatus> {
    let cmd_display = display_command(cmd);
    ui::command(&cmd_display);

    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| SetupError::SystemCommandFailed {
            command: cmd_display,
            reason: e.to_string(),
        })
}

/// Run an interactive command and turn a non-zero exit into an error
pub fn run_checked(cmd: &mut Command) -> Result<()> {
    let cmd_display = display_command(cmd);
    let status = run_interactive(cmd)?;

    if !status.success() {
        return Err(SetupError::PackageManagerError(format!(
            "'{}' exited with {}",
            cmd_display, status
        )));
    }
    Ok(())
}

/// Run a command non-interactively and capture its output
pub fn run_captured(cmd: &mut Command) -> Result<Output> {
    let cmd_display = display_command(cmd);
    ui::command(&cmd_display);

    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| SetupError::SystemCommandFailed {
            command: cmd_display,
            reason: e.to_string(),
        })
}
