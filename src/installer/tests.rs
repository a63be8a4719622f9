use super::*;
use crate::host::Backend;
use crate::installer::catalog::{BuildScript, ToolProbe};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

type CallLog = Rc<RefCell<Vec<String>>>;

/// Scripted package manager that records every call
struct MockManager {
    backend: Backend,
    available: bool,
    installed: HashSet<String>,
    failing: HashSet<String>,
    calls: CallLog,
}

impl MockManager {
    fn new(backend: Backend, calls: &CallLog) -> Self {
        Self {
            backend,
            available: true,
            installed: HashSet::new(),
            failing: HashSet::new(),
            calls: Rc::clone(calls),
        }
    }

    fn with_installed(mut self, packages: &[&str]) -> Self {
        self.installed.extend(packages.iter().map(|p| p.to_string()));
        self
    }

    /// Operations ("upgrade make", "update") that should fail
    fn failing_on(mut self, ops: &[&str]) -> Self {
        self.failing.extend(ops.iter().map(|p| p.to_string()));
        self
    }

    fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    fn record(&self, op: String) -> Result<()> {
        self.calls.borrow_mut().push(op.clone());
        if self.failing.contains(&op) {
            return Err(SetupError::PackageManagerError(format!("{op} exited with 1")));
        }
        Ok(())
    }
}

impl PackageManager for MockManager {
    fn backend(&self) -> Backend {
        self.backend
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn bootstrap(&self) -> Result<()> {
        self.record("bootstrap".into())
    }

    fn update_index(&self) -> Result<()> {
        self.record("update".into())
    }

    fn is_installed(&self, package: &str, _version: Option<&str>) -> Result<bool> {
        self.calls.borrow_mut().push(format!("check {package}"));
        Ok(self.installed.contains(package))
    }

    fn install(&self, package: &str) -> Result<()> {
        self.record(format!("install {package}"))
    }

    fn upgrade(&self, package: &str) -> Result<()> {
        self.record(format!("upgrade {package}"))
    }
}

struct MockBuildHost {
    built: HashSet<&'static str>,
    script_fails: bool,
    calls: CallLog,
}

impl MockBuildHost {
    fn new(calls: &CallLog) -> Self {
        Self {
            built: HashSet::new(),
            script_fails: false,
            calls: Rc::clone(calls),
        }
    }
}

impl BuildHost for MockBuildHost {
    fn is_tool_built(&self, probe: &ToolProbe) -> bool {
        self.built.contains(probe.program)
    }

    fn run_build_script(&self, script: &BuildScript) -> Result<()> {
        self.calls.borrow_mut().push(format!("script {}", script.path));
        if self.script_fails {
            return Err(SetupError::PackageManagerError("script exited with 2".into()));
        }
        Ok(())
    }
}

/// Scripted confirmation source: pops answers in order, records questions
fn scripted(answers: &[bool], calls: &CallLog) -> Box<dyn Confirm> {
    let mut answers: Vec<bool> = answers.iter().rev().copied().collect();
    let calls = Rc::clone(calls);
    Box::new(move |question: &str| {
        calls.borrow_mut().push(format!("ask {question}"));
        answers.pop().expect("unexpected prompt")
    })
}

fn installer(manager: MockManager, build: MockBuildHost, confirm: Box<dyn Confirm>, packages: &[&str]) -> Installer {
    Installer::new(Box::new(manager), Box::new(build), confirm, packages)
}

/// Confirmation source that answers "yes" while Ctrl-C lands during the prompt
fn interrupted_while_asking(flag: &Rc<Cell<bool>>, calls: &CallLog) -> Box<dyn Confirm> {
    let flag = Rc::clone(flag);
    let calls = Rc::clone(calls);
    Box::new(move |question: &str| {
        calls.borrow_mut().push(format!("ask {question}"));
        flag.set(true);
        true
    })
}

fn with_flag(inst: Installer, flag: &Rc<Cell<bool>>) -> Installer {
    let flag = Rc::clone(flag);
    inst.with_interrupt_check(move || flag.get())
}

fn calls_of(calls: &CallLog) -> Vec<String> {
    calls.borrow().clone()
}

#[test]
fn all_installed_upgrades_each_once_in_order() {
    let calls = CallLog::default();
    let manager = MockManager::new(Backend::Homebrew, &calls).with_installed(&["make", "nasm", "xorriso"]);
    let mut inst = installer(manager, MockBuildHost::new(&calls), scripted(&[], &calls), &["make", "nasm", "xorriso"]);

    assert!(inst.install().is_ok());

    let upgrades: Vec<String> = calls_of(&calls)
        .into_iter()
        .filter(|c| c.starts_with("upgrade"))
        .collect();
    assert_eq!(upgrades, vec!["upgrade make", "upgrade nasm", "upgrade xorriso"]);
    assert_eq!(calls_of(&calls)[0], "update");
}

#[test]
fn failed_upgrade_stops_remaining_packages() {
    let calls = CallLog::default();
    let manager = MockManager::new(Backend::Homebrew, &calls)
        .with_installed(&["make", "nasm", "xorriso"])
        .failing_on(&["upgrade nasm"]);
    let mut inst = installer(manager, MockBuildHost::new(&calls), scripted(&[], &calls), &["make", "nasm", "xorriso"]);

    let err = inst.install().unwrap_err();
    assert_eq!(err.to_string(), "failed to upgrade package \"nasm\"");

    let log = calls_of(&calls);
    assert_eq!(log.last().unwrap(), "upgrade nasm");
    assert!(!log.iter().any(|c| c.contains("xorriso")));
}

#[test]
fn declining_bootstrap_skips_all_package_work() {
    let calls = CallLog::default();
    let manager = MockManager::new(Backend::Homebrew, &calls).unavailable();
    let mut inst = installer(manager, MockBuildHost::new(&calls), scripted(&[false], &calls), &["make", "nasm"]);

    let err = inst.install().unwrap_err();
    assert!(matches!(err, SetupError::Declined(_)));
    assert_eq!(calls_of(&calls), vec!["ask homebrew is not installed... install it?"]);
}

#[test]
fn accepted_bootstrap_skips_index_update() {
    let calls = CallLog::default();
    let manager = MockManager::new(Backend::Homebrew, &calls)
        .unavailable()
        .with_installed(&["make"]);
    let mut inst = installer(manager, MockBuildHost::new(&calls), scripted(&[true], &calls), &["make"]);

    assert!(inst.install().is_ok());
    let log = calls_of(&calls);
    assert_eq!(log[1], "bootstrap");
    assert!(!log.contains(&"update".to_string()));
}

#[test]
fn failed_bootstrap_is_fatal() {
    let calls = CallLog::default();
    let manager = MockManager::new(Backend::Apt, &calls)
        .unavailable()
        .failing_on(&["bootstrap"]);
    let mut inst = installer(manager, MockBuildHost::new(&calls), scripted(&[true], &calls), &["make"]);

    let err = inst.install().unwrap_err();
    assert_eq!(err.to_string(), "failed to bootstrap apt");
    assert!(!calls_of(&calls).iter().any(|c| c.starts_with("check")));
}

#[test]
fn failed_index_update_is_fatal() {
    let calls = CallLog::default();
    let manager = MockManager::new(Backend::Apt, &calls).failing_on(&["update"]);
    let mut inst = installer(manager, MockBuildHost::new(&calls), scripted(&[], &calls), &["make"]);

    let err = inst.install().unwrap_err();
    assert_eq!(err.to_string(), "failed to update apt");
    assert_eq!(calls_of(&calls), vec!["update"]);
}

#[test]
fn declining_package_install_aborts_immediately() {
    let calls = CallLog::default();
    let manager = MockManager::new(Backend::Apt, &calls);
    let mut inst = installer(manager, MockBuildHost::new(&calls), scripted(&[false], &calls), &["make", "nasm"]);

    let err = inst.install().unwrap_err();
    assert!(matches!(err, SetupError::Declined(_)));

    let log = calls_of(&calls);
    assert_eq!(log.last().unwrap(), "ask make is not installed... install it?");
    assert!(!log.iter().any(|c| c.contains("nasm")));
}

#[test]
fn missing_package_installed_after_yes() {
    let calls = CallLog::default();
    let manager = MockManager::new(Backend::Apt, &calls);
    let mut inst = installer(manager, MockBuildHost::new(&calls), scripted(&[true], &calls), &["make"]);

    assert!(inst.install().is_ok());
    assert_eq!(
        calls_of(&calls),
        vec![
            "update",
            "check make",
            "ask make is not installed... install it?",
            "install make",
        ]
    );
}

#[test]
fn failed_install_reports_package() {
    let calls = CallLog::default();
    let manager = MockManager::new(Backend::Apt, &calls).failing_on(&["install nasm"]);
    let mut inst = installer(manager, MockBuildHost::new(&calls), scripted(&[true], &calls), &["nasm"]);

    let err = inst.install().unwrap_err();
    assert_eq!(err.to_string(), "failed to install package \"nasm\"");
}

#[test]
fn unsupported_package_fails_in_order() {
    let calls = CallLog::default();
    let manager = MockManager::new(Backend::Homebrew, &calls).with_installed(&["make", "nasm"]);
    let mut inst = installer(manager, MockBuildHost::new(&calls), scripted(&[], &calls), &["make", "qemu", "nasm"]);

    assert_eq!(inst.steps()[1], Step::Unsupported { id: "qemu".into() });

    let err = inst.install().unwrap_err();
    assert_eq!(err.to_string(), "package qemu can not be installed on MacOS");

    let log = calls_of(&calls);
    assert!(log.contains(&"upgrade make".to_string()));
    assert!(!log.iter().any(|c| c.contains("nasm")));
}

#[test]
fn linux_grub_checks_both_sub_packages() {
    let calls = CallLog::default();
    let manager = MockManager::new(Backend::Apt, &calls).with_installed(&["grub2-common"]);
    let mut inst = installer(manager, MockBuildHost::new(&calls), scripted(&[true], &calls), &["grub2"]);

    assert!(inst.install().is_ok());
    let log = calls_of(&calls);
    assert!(log.contains(&"upgrade grub2-common".to_string()));
    assert!(log.contains(&"install grub-pc-bin".to_string()));
}

#[test]
fn linux_cross_binutils_installs_deps_then_runs_script() {
    let calls = CallLog::default();
    let deps = ["make", "bison", "flex", "libgmp3-dev", "libmpc-dev", "libmpfr-dev", "texinfo"];
    let manager = MockManager::new(Backend::Apt, &calls).with_installed(&deps);
    let mut inst = installer(manager, MockBuildHost::new(&calls), scripted(&[], &calls), &["cross-binutils"]);

    assert!(inst.install().is_ok());

    let log = calls_of(&calls);
    let upgrades = log.iter().filter(|c| c.starts_with("upgrade")).count();
    assert_eq!(upgrades, deps.len());
    assert_eq!(log.last().unwrap(), "script linux/install_x86_64-elf-binutils.sh");
}

#[test]
fn already_built_tool_skips_deps_and_script() {
    let calls = CallLog::default();
    let manager = MockManager::new(Backend::Apt, &calls);
    let mut build = MockBuildHost::new(&calls);
    build.built.insert("x86_64-elf-gcc");
    let mut inst = installer(manager, build, scripted(&[], &calls), &["x86_64-elf-gcc"]);

    assert!(inst.install().is_ok());
    assert_eq!(calls_of(&calls), vec!["update"]);
}

#[test]
fn failing_build_script_is_fatal() {
    let calls = CallLog::default();
    let manager = MockManager::new(Backend::Homebrew, &calls).with_installed(&[
        "pkg-config", "m4", "libtool", "automake", "autoconf", "objconv", "gawk",
    ]);
    let mut build = MockBuildHost::new(&calls);
    build.script_fails = true;
    let mut inst = installer(manager, build, scripted(&[], &calls), &["grub2", "nasm"]);

    let err = inst.install().unwrap_err();
    assert_eq!(err.to_string(), "failed to execute installation script for grub2");
    assert!(!calls_of(&calls).iter().any(|c| c.contains("nasm")));
}

#[test]
fn second_run_only_upgrades() {
    let calls = CallLog::default();
    let manager = MockManager::new(Backend::Homebrew, &calls).with_installed(&["make", "nasm"]);
    let mut inst = installer(manager, MockBuildHost::new(&calls), scripted(&[], &calls), &["make", "nasm"]);

    assert!(inst.install().is_ok());
    assert!(inst.install().is_ok());

    let log = calls_of(&calls);
    assert_eq!(log.iter().filter(|c| *c == "upgrade make").count(), 2);
    assert!(!log.iter().any(|c| c.starts_with("install") || c.starts_with("ask")));
}

#[test]
fn interrupt_during_prompt_cancels_install() {
    let calls = CallLog::default();
    let flag = Rc::new(Cell::new(false));
    let manager = MockManager::new(Backend::Apt, &calls);
    let inst = installer(manager, MockBuildHost::new(&calls), interrupted_while_asking(&flag, &calls), &["grub2"]);
    let mut inst = with_flag(inst, &flag);

    let err = inst.install().unwrap_err();
    assert!(matches!(err, SetupError::Interrupted));

    let log = calls_of(&calls);
    assert_eq!(log.last().unwrap(), "ask grub2-common is not installed... install it?");
    assert!(!log.iter().any(|c| c.starts_with("install")));
    assert!(!log.iter().any(|c| c.contains("grub-pc-bin")));
}

#[test]
fn interrupt_during_bootstrap_prompt_skips_bootstrap() {
    let calls = CallLog::default();
    let flag = Rc::new(Cell::new(false));
    let manager = MockManager::new(Backend::Homebrew, &calls).unavailable();
    let inst = installer(manager, MockBuildHost::new(&calls), interrupted_while_asking(&flag, &calls), &["make"]);
    let mut inst = with_flag(inst, &flag);

    assert!(matches!(inst.install(), Err(SetupError::Interrupted)));
    assert!(!calls_of(&calls).contains(&"bootstrap".to_string()));
}

#[test]
fn interrupt_in_last_step_is_not_success() {
    let calls = CallLog::default();
    let flag = Rc::new(Cell::new(false));
    let manager = MockManager::new(Backend::Homebrew, &calls).with_installed(&["make"]);
    let inst = installer(manager, MockBuildHost::new(&calls), scripted(&[], &calls), &["make"]);
    let check = Rc::clone(&flag);
    let log = Rc::clone(&calls);
    // Ctrl-C arrives while the final upgrade is running
    let mut inst = inst.with_interrupt_check(move || {
        if log.borrow().iter().any(|c| c == "upgrade make") {
            check.set(true);
        }
        check.get()
    });

    assert!(matches!(inst.install(), Err(SetupError::Interrupted)));
    assert_eq!(calls_of(&calls).last().unwrap(), "upgrade make");
}

#[test]
fn interrupt_before_build_script_keeps_script_from_running() {
    let calls = CallLog::default();
    let flag = Rc::new(Cell::new(false));
    // objconv is missing; Ctrl-C lands on its prompt
    let manager = MockManager::new(Backend::Homebrew, &calls).with_installed(&[
        "pkg-config", "m4", "libtool", "automake", "autoconf", "gawk",
    ]);
    let inst = installer(manager, MockBuildHost::new(&calls), interrupted_while_asking(&flag, &calls), &["grub2"]);
    let mut inst = with_flag(inst, &flag);

    assert!(matches!(inst.install(), Err(SetupError::Interrupted)));

    let log = calls_of(&calls);
    assert!(log.contains(&"ask objconv is not installed... install it?".to_string()));
    assert!(!log.iter().any(|c| c.starts_with("script")));
    assert!(!log.contains(&"check gawk".to_string()));
}

#[test]
fn uninterrupted_run_is_unaffected_by_checks() {
    let calls = CallLog::default();
    let flag = Rc::new(Cell::new(false));
    let manager = MockManager::new(Backend::Apt, &calls).with_installed(&["make"]);
    let inst = installer(manager, MockBuildHost::new(&calls), scripted(&[], &calls), &["make"]);
    let mut inst = with_flag(inst, &flag);

    assert!(inst.install().is_ok());
    assert_eq!(calls_of(&calls), vec!["update", "check make", "upgrade make"]);
}
