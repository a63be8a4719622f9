//! # Installer
//!
//! Walks the requested package list in order and makes sure each package is
//! present and current, using the backend's routine table. The first failing
//! step aborts the run; nothing already installed is rolled back.
//!
//! Every step follows the same micro-protocol per manager package:
//! installed → upgrade; missing → ask, then install. A "no" aborts the run.

pub mod build;
pub mod catalog;
pub mod confirm;

pub use build::{BuildHost, ScriptHost};
pub use catalog::{DEFAULT_PACKAGES, Routine, ToolPackage};
pub use confirm::{AssumeYes, Confirm, ConsolePrompt};

use crate::error::{Result, SetupError};
use crate::packages::PackageManager;
use crate::ui;

/// A requested identifier, resolved against the routine table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Run { id: String, routine: Routine },
    Unsupported { id: String },
}

pub struct Installer {
    manager: Box<dyn PackageManager>,
    build_host: Box<dyn BuildHost>,
    confirm: Box<dyn Confirm>,
    interrupted: Box<dyn Fn() -> bool>,
    steps: Vec<Step>,
}

impl Installer {
    pub fn new<S: AsRef<str>>(
        manager: Box<dyn PackageManager>,
        build_host: Box<dyn BuildHost>,
        confirm: Box<dyn Confirm>,
        packages: &[S],
    ) -> Self {
        let table = catalog::routine_table(manager.backend());
        let steps = packages
            .iter()
            .map(|id| {
                let id = id.as_ref().to_string();
                match ToolPackage::from_id(&id).and_then(|p| table.get(&p).copied()) {
                    Some(routine) => Step::Run { id, routine },
                    None => Step::Unsupported { id },
                }
            })
            .collect();

        Self {
            manager,
            build_host,
            confirm,
            interrupted: Box::new(ui::is_interrupted),
            steps,
        }
    }

    /// Replace the Ctrl-C flag the run polls between operations
    pub fn with_interrupt_check(mut self, interrupted: impl Fn() -> bool + 'static) -> Self {
        self.interrupted = Box::new(interrupted);
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn manager_name(&self) -> &'static str {
        self.manager.name()
    }

    /// Ensure the package manager is usable, then run every step in order.
    pub fn install(&mut self) -> Result<()> {
        let mut session = Session {
            manager: self.manager.as_ref(),
            build_host: self.build_host.as_ref(),
            confirm: self.confirm.as_mut(),
            interrupted: self.interrupted.as_ref(),
        };

        session.prepare_manager()?;

        for step in &self.steps {
            session.check_interrupted()?;
            session.run_step(step)?;
        }

        // An interrupt during the last step must not end in success.
        session.check_interrupted()
    }
}

struct Session<'a> {
    manager: &'a dyn PackageManager,
    build_host: &'a dyn BuildHost,
    confirm: &'a mut dyn Confirm,
    interrupted: &'a dyn Fn() -> bool,
}

impl Session<'_> {
    fn check_interrupted(&self) -> Result<()> {
        if (self.interrupted)() {
            return Err(SetupError::Interrupted);
        }
        Ok(())
    }

    /// Ask the operator; a Ctrl-C while the prompt was open wins over the answer.
    fn ask(&mut self, question: &str) -> Result<bool> {
        self.check_interrupted()?;
        let answer = self.confirm.confirm(question);
        self.check_interrupted()?;
        Ok(answer)
    }

    fn prepare_manager(&mut self) -> Result<()> {
        let name = self.manager.name();

        if !self.manager.is_available() {
            if !self.ask(&format!("{} is not installed... install it?", name))? {
                return Err(SetupError::Declined(format!("{} was not installed", name)));
            }

            ui::info(&format!("installing {}", name));
            return self
                .manager
                .bootstrap()
                .map_err(|e| SetupError::BootstrapFailed {
                    manager: name.to_string(),
                    source: Box::new(e),
                });
        }

        ui::info(&format!("updating {}", name));
        self.manager
            .update_index()
            .map_err(|e| SetupError::UpdateFailed {
                manager: name.to_string(),
                source: Box::new(e),
            })
    }

    fn run_step(&mut self, step: &Step) -> Result<()> {
        match step {
            Step::Unsupported { id } => Err(SetupError::UnsupportedPackage {
                package: id.clone(),
                platform: self.manager.backend().platform_name().to_string(),
            }),
            Step::Run {
                routine: Routine::Managed { packages },
                ..
            } => packages.iter().try_for_each(|p| self.ensure_package(p)),
            Step::Run {
                id,
                routine:
                    Routine::FromSource {
                        probe,
                        build_deps,
                        script,
                    },
            } => {
                if self.build_host.is_tool_built(probe) {
                    ui::info(&format!("\"{}\" is already built", id));
                    return Ok(());
                }

                for dep in build_deps.iter() {
                    self.ensure_package(dep)?;
                }

                self.check_interrupted()?;
                ui::info(&format!("building \"{}\" from source", id));
                self.build_host
                    .run_build_script(script)
                    .map_err(|e| SetupError::ScriptFailed {
                        package: id.clone(),
                        source: Box::new(e),
                    })
            }
        }
    }

    /// Upgrade when installed, otherwise offer a fresh install.
    fn ensure_package(&mut self, package: &str) -> Result<()> {
        self.check_interrupted()?;

        let installed = self
            .manager
            .is_installed(package, None)
            .map_err(|e| SetupError::package_op("check", package, e))?;

        if installed {
            ui::info(&format!("upgrading \"{}\"", package));
            return self
                .manager
                .upgrade(package)
                .map_err(|e| SetupError::package_op("upgrade", package, e));
        }

        if !self.ask(&format!("{} is not installed... install it?", package))? {
            return Err(SetupError::Declined(format!("{} was not installed", package)));
        }

        ui::info(&format!("installing \"{}\"", package));
        self.manager
            .install(package)
            .map_err(|e| SetupError::package_op("install", package, e))
    }
}

#[cfg(test)]
mod tests;
