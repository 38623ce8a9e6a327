//! Install command implementation.

use std::path::{Path, PathBuf};

use crate::cli::args::InstallArgs;
use crate::config::{rule_table, VskitConfig};
use crate::error::Result;
use crate::installer::{latest_backup, InstallOptions, PackageInstaller};
use crate::requirements::{LibraryProbe, PythonProbe, VersionChecker};
use crate::shell::{ProcessRunner, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The install command implementation.
pub struct InstallCommand {
    project_root: PathBuf,
    config: VskitConfig,
    args: InstallArgs,
}

impl InstallCommand {
    pub fn new(project_root: &Path, config: VskitConfig, args: InstallArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config,
            args,
        }
    }

    fn options(&self) -> InstallOptions {
        InstallOptions {
            dry_run: self.args.dry_run,
            skip_backup: self.args.skip_backup,
        }
    }

    /// Run with the given process runner and probe.
    ///
    /// Installer failures propagate as errors; the caller reports them.
    pub fn run_with(
        &self,
        ui: &mut dyn UserInterface,
        runner: &dyn ProcessRunner,
        probe: &dyn LibraryProbe,
    ) -> Result<CommandResult> {
        let checker = VersionChecker::new(rule_table(&self.config)?);
        let python = self.config.python_command();

        ui.show_header(&format!("Installing pinned packages into {}", python));
        let installer = PackageInstaller::new(python, runner, &self.project_root, self.options());
        let outcome = match installer.run(ui, &checker, probe) {
            Ok(outcome) => outcome,
            Err(e) => {
                // The newest backup may predate this run when --skip-backup was given.
                if let Some(backup) = latest_backup(&self.project_root) {
                    ui.show_hint(&rollback_hint(python, &backup));
                }
                return Err(e);
            }
        };

        if self.args.dry_run {
            return Ok(CommandResult::success());
        }

        if let Some(backup) = &outcome.backup {
            ui.show_hint(&rollback_hint(python, backup));
        }
        if outcome.warnings.is_empty() {
            ui.success("Environment installed");
        } else {
            ui.warning(&format!(
                "Environment installed with {} warning(s)",
                outcome.warnings.len()
            ));
        }
        ui.show_hint("Run `vskit launcher` to create the desktop launcher");
        Ok(CommandResult::success())
    }
}

fn rollback_hint(python: &str, backup: &Path) -> String {
    format!(
        "To roll back: {} -m pip install -r \"{}\"",
        python,
        backup.display()
    )
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let runner = SystemRunner::new();
        let probe = PythonProbe::new(self.config.python_command(), &runner);
        self.run_with(ui, &runner, &probe)
    }
}
