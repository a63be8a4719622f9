use std::process::Command;

/// Build a shell command.
///
/// `sh -c <command>`, or `sudo sh -c <command>` when elevated.
pub fn build_shell_command(command: &str, elevated: bool) -> Command {
    let mut cmd = if elevated {
        let mut c = Command::new("sudo");
        c.arg("sh");
        c
    } else {
        Command::new("sh")
    };
    cmd.arg("-c").arg(command);
    cmd
}

/// Build a direct program invocation.
///
/// `program args...`, or `sudo program args...` when elevated.
pub fn build_program_command(program: &str, args: &[&str], elevated: bool) -> Command {
    let mut cmd = if elevated {
        let mut c = Command::new("sudo");
        c.arg(program);
        c
    } else {
        Command::new(program)
    };
    cmd.args(args);
    cmd
}

/// Render a command the way an operator would type it.
pub fn display_command(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|part| part.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
