use colored::Colorize;
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Disable colors when stdout is not a terminal or NO_COLOR is set.
pub fn init_colors() {
    if std::env::var_os("NO_COLOR").is_some() || !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

pub fn mark_interrupted() {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

pub fn header(title: &str) {
    if is_quiet() {
        return;
    }
    println!("\n{}", title.bold().underline());
}

pub fn write_info<W: Write>(out: &mut W, msg: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "info:".blue().bold(), msg)
}

pub fn write_warning<W: Write>(out: &mut W, msg: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "warn:".yellow().bold(), msg)
}

pub fn write_error<W: Write>(out: &mut W, msg: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "error:".red().bold(), msg)
}

pub fn info(msg: &str) {
    if is_quiet() {
        return;
    }
    let _ = write_info(&mut io::stdout(), msg);
}

pub fn warning(msg: &str) {
    let _ = write_warning(&mut io::stdout(), msg);
}

pub fn error(msg: &str) {
    let _ = write_error(&mut io::stdout(), msg);
}

/// Echo an external command before it runs (verbose mode only)
pub fn command(cmd: &str) {
    if !is_verbose() {
        return;
    }
    println!("  {} {}", "$".bright_black(), cmd.bright_black());
}

pub fn indent(msg: &str, level: usize) {
    let spaces = " ".repeat(level * 2);
    println!("{}{}", spaces, msg);
}

/// Interpret one line of operator input.
///
/// Returns `None` for anything that is not a recognizable yes/no answer.
pub fn parse_answer(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Ask a yes/no question until the operator gives a recognizable answer.
///
/// End of input (or a broken stdin) counts as "no".
pub fn prompt_yes_no_with<R: BufRead, W: Write>(question: &str, input: &mut R, out: &mut W) -> bool {
    loop {
        if write!(out, "{} {} [y/n] ", "?".yellow().bold(), question)
            .and_then(|_| out.flush())
            .is_err()
        {
            return false;
        }

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => {
                let _ = writeln!(out);
                return false;
            }
            Ok(_) => match parse_answer(&line) {
                Some(answer) => return answer,
                None => {
                    let _ = write_warning(out, "please answer yes or no");
                }
            },
            Err(e) => {
                let _ = writeln!(out, "\n{} failed to read input: {}", "warn:".yellow().bold(), e);
                return false;
            }
        }
    }
}

pub fn prompt_yes_no(question: &str) -> bool {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    prompt_yes_no_with(question, &mut input, &mut out)
}
