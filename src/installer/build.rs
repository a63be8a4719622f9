//! From-source builds: tool probes and the bundled build scripts.

use crate::error::{Result, SetupError};
use crate::installer::catalog::{BuildScript, ToolProbe};
use crate::utils::platform::build_program_command;
use crate::utils::process;
use std::path::PathBuf;

pub trait BuildHost {
    /// Is the tool already on the host?
    fn is_tool_built(&self, probe: &ToolProbe) -> bool;

    fn run_build_script(&self, script: &BuildScript) -> Result<()>;
}

/// Runs probes and scripts on the real host
pub struct ScriptHost {
    scripts_dir: PathBuf,
}

impl ScriptHost {
    pub fn new(scripts_dir: impl Into<PathBuf>) -> Self {
        Self {
            scripts_dir: scripts_dir.into(),
        }
    }

    pub fn script_path(&self, script: &BuildScript) -> PathBuf {
        self.scripts_dir.join(script.path)
    }
}

/// True if `output` of a `--version` probe identifies the tool
pub fn probe_matches(probe: &ToolProbe, output: &str) -> bool {
    output.contains(probe.marker)
}

impl BuildHost for ScriptHost {
    fn is_tool_built(&self, probe: &ToolProbe) -> bool {
        // A missing executable is the common case: not built yet.
        match process::run_captured(&mut build_program_command(probe.program, &["--version"], false)) {
            Ok(output) => probe_matches(probe, &String::from_utf8_lossy(&output.stdout)),
            Err(_) => false,
        }
    }

    fn run_build_script(&self, script: &BuildScript) -> Result<()> {
        let path = self.script_path(script);
        if !path.is_file() {
            return Err(SetupError::ScriptMissing { path });
        }

        let mut cmd = build_program_command(script.interpreter, &[script.path], false);
        cmd.current_dir(&self.scripts_dir);
        process::run_checked(&mut cmd)
    }
}
