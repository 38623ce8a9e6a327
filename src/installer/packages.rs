//! Pinned package installation.
//!
//! Brings a Python environment to the known-good set: NumPy 1.26.4,
//! PyTorch 2.7.0 built for CUDA 11.8, VapourSynth R72. Steps run in order
//! through `<python> -m pip`; each has a failure policy deciding whether the
//! run stops. Nothing is retried.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, VskitError};
use crate::requirements::{
    CheckReport, Library, LibraryProbe, VersionChecker, TORCH_CU118_INDEX,
};
use crate::shell::{format_command, CommandResult, ProcessRunner};
use crate::ui::UserInterface;

/// Packages removed before the pinned versions are installed.
pub const CONFLICTING_PACKAGES: [&str; 5] =
    ["numpy", "vapoursynth", "torch", "torchvision", "torchaudio"];

/// What a failed step does to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop with [`VskitError::InstallFailed`].
    Abort,
    /// Record a warning and continue.
    Warn,
    /// Log and continue.
    Ignore,
}

/// One pip invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallStep {
    /// Short label for progress output.
    pub name: String,
    /// Arguments after the interpreter.
    pub args: Vec<String>,
    pub policy: FailurePolicy,
}

impl InstallStep {
    fn pip(name: impl Into<String>, pip_args: &[&str], policy: FailurePolicy) -> Self {
        let args = ["-m", "pip"]
            .iter()
            .chain(pip_args)
            .map(|s| s.to_string())
            .collect();
        Self {
            name: name.into(),
            args,
            policy,
        }
    }
}

/// The uninstall and install steps, in execution order.
pub fn pinned_steps() -> Vec<InstallStep> {
    let mut steps: Vec<InstallStep> = CONFLICTING_PACKAGES
        .iter()
        .map(|pkg| {
            InstallStep::pip(
                format!("uninstall {}", pkg),
                &["uninstall", "-y", pkg],
                FailurePolicy::Ignore,
            )
        })
        .collect();

    steps.push(InstallStep::pip(
        "install numpy==1.26.4",
        &["install", "numpy==1.26.4"],
        FailurePolicy::Abort,
    ));
    steps.push(InstallStep::pip(
        "install torch==2.7.0+cu118",
        &[
            "install",
            "torch==2.7.0+cu118",
            "torchvision",
            "torchaudio",
            "--index-url",
            TORCH_CU118_INDEX,
        ],
        FailurePolicy::Warn,
    ));
    steps.push(InstallStep::pip(
        "install vapoursynth==72",
        &["install", "vapoursynth==72"],
        FailurePolicy::Abort,
    ));
    steps
}

/// Installer switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    /// Print the commands without running them.
    pub dry_run: bool,
    /// Do not write the `pip freeze` backup.
    pub skip_backup: bool,
}

/// What an install run did.
#[derive(Debug, Clone, Default)]
pub struct InstallOutcome {
    /// Where the `pip freeze` backup was written.
    pub backup: Option<PathBuf>,
    /// Optional steps that failed.
    pub warnings: Vec<String>,
    /// Post-install verification; `None` for dry runs.
    pub report: Option<CheckReport>,
}

/// Runs the pinned installation plan.
pub struct PackageInstaller<'a> {
    python: String,
    runner: &'a dyn ProcessRunner,
    backup_dir: PathBuf,
    options: InstallOptions,
}

impl<'a> PackageInstaller<'a> {
    pub fn new(
        python: &str,
        runner: &'a dyn ProcessRunner,
        backup_dir: impl Into<PathBuf>,
        options: InstallOptions,
    ) -> Self {
        Self {
            python: python.to_string(),
            runner,
            backup_dir: backup_dir.into(),
            options,
        }
    }

    /// Execute the plan, then verify with `checker`.
    ///
    /// Fails if the interpreter is not Python 3, a mandatory step fails, or
    /// the post-install report contains an ERROR.
    pub fn run(
        &self,
        ui: &mut dyn UserInterface,
        checker: &VersionChecker,
        probe: &dyn LibraryProbe,
    ) -> Result<InstallOutcome> {
        let steps = pinned_steps();

        if self.options.dry_run {
            ui.message("Dry run; the following commands would be executed:");
            if !self.options.skip_backup {
                ui.message(&format!(
                    "  {} > {}",
                    format_command(&self.python, &freeze_args()),
                    self.backup_dir.join("package_backup_<timestamp>.txt").display()
                ));
            }
            for step in &steps {
                ui.message(&format!("  {}", format_command(&self.python, &step.args)));
            }
            return Ok(InstallOutcome::default());
        }

        let mut outcome = InstallOutcome::default();

        let version = self.verify_python(probe)?;
        ui.success(&format!("Python {}", version));

        if !self.options.skip_backup {
            outcome.backup = self.backup(ui);
        }

        for step in &steps {
            if let Some(warning) = self.execute(ui, step)? {
                outcome.warnings.push(warning);
            }
        }

        let report = checker.run(probe);
        ui.show_report(&report);
        report.ensure_ok()?;
        outcome.report = Some(report);
        Ok(outcome)
    }

    fn verify_python(&self, probe: &dyn LibraryProbe) -> Result<String> {
        let version = probe
            .version(Library::Python)
            .map_err(|e| VskitError::InstallFailed {
                step: "verify python".to_string(),
                message: e.to_string(),
            })?;

        if !version.starts_with("3.") {
            return Err(VskitError::InstallFailed {
                step: "verify python".to_string(),
                message: format!("{} is Python {}, Python 3 is required", self.python, version),
            });
        }
        Ok(version)
    }

    /// Save `pip freeze` output. A failed backup is a warning, not an error.
    fn backup(&self, ui: &mut dyn UserInterface) -> Option<PathBuf> {
        let path = self.backup_dir.join(backup_file_name(chrono::Utc::now().timestamp()));

        let saved = self
            .runner
            .run(&self.python, &freeze_args())
            .and_then(|result| {
                if result.success {
                    fs::write(&path, &result.stdout)?;
                    Ok(true)
                } else {
                    tracing::debug!("pip freeze failed: {}", result.diagnostic());
                    Ok(false)
                }
            });

        match saved {
            Ok(true) => {
                ui.success(&format!("Backup saved to {}", path.display()));
                Some(path)
            }
            Ok(false) => {
                ui.warning("Could not back up installed packages (pip freeze failed)");
                None
            }
            Err(e) => {
                ui.warning(&format!("Could not back up installed packages: {}", e));
                None
            }
        }
    }

    /// Run one step. Returns a warning for a failed optional step.
    fn execute(&self, ui: &mut dyn UserInterface, step: &InstallStep) -> Result<Option<String>> {
        let mut spinner = ui.start_spinner(&step.name);
        let result = self.runner.run(&self.python, &step.args);

        if ui.output_mode().shows_command_output() {
            if let Ok(CommandResult { stdout, .. }) = &result {
                if !stdout.trim().is_empty() {
                    ui.message(stdout.trim_end());
                }
            }
        }

        let failure = match result {
            Ok(r) if r.success => {
                spinner.finish_success(&step.name);
                return Ok(None);
            }
            Ok(r) => r.diagnostic(),
            Err(e) => e.to_string(),
        };

        match step.policy {
            FailurePolicy::Abort => {
                spinner.finish_error(&format!("{} failed", step.name));
                Err(VskitError::InstallFailed {
                    step: step.name.clone(),
                    message: failure,
                })
            }
            FailurePolicy::Warn => {
                spinner.finish_error(&format!("{} failed (optional)", step.name));
                let warning = format!("{} failed: {}", step.name, failure);
                ui.warning(&warning);
                Ok(Some(warning))
            }
            FailurePolicy::Ignore => {
                tracing::debug!("{} failed (ignored): {}", step.name, failure);
                spinner.finish_skipped(&format!("{} (nothing to remove)", step.name));
                Ok(None)
            }
        }
    }
}

fn freeze_args() -> Vec<String> {
    vec!["-m".into(), "pip".into(), "freeze".into()]
}

/// `package_backup_<unix-seconds>.txt`
pub fn backup_file_name(timestamp: i64) -> String {
    format!("package_backup_{}.txt", timestamp)
}

/// Newest backup file in `dir`, by timestamp in the name.
pub fn latest_backup(dir: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    entries
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let name = e.file_name().into_string().ok()?;
            let stamp: i64 = name
                .strip_prefix("package_backup_")?
                .strip_suffix(".txt")?
                .parse()
                .ok()?;
            Some((stamp, e.path()))
        })
        .max_by_key(|(stamp, _)| *stamp)
        .map(|(_, path)| path)
}
