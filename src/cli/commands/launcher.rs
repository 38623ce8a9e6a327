//! Launcher command implementation.

use std::path::PathBuf;

use crate::cli::args::LauncherArgs;
use crate::config::{expand_home, VskitConfig};
use crate::error::{Result, VskitError};
use crate::installer::{default_launcher_path, LauncherScript, LauncherWriter};
use crate::requirements::Application;
use crate::shell::is_windows;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

const NO_DESKTOP: &str =
    "cannot determine the desktop directory; pass --output or set launcher.path";

/// The launcher command implementation.
pub struct LauncherCommand {
    config: VskitConfig,
    args: LauncherArgs,
}

impl LauncherCommand {
    pub fn new(config: VskitConfig, args: LauncherArgs) -> Self {
        Self { config, args }
    }

    /// Where the script goes: `--output`, then config, then the desktop.
    pub fn target_path(&self) -> Result<PathBuf> {
        self.args
            .output
            .clone()
            .or_else(|| self.config.launcher.path.as_deref().map(expand_home))
            .or_else(default_launcher_path)
            .ok_or_else(|| VskitError::ConfigValidationError {
                message: NO_DESKTOP.to_string(),
            })
    }

    /// The script for the applications found on this machine.
    pub fn script(&self) -> LauncherScript {
        let locator = self.config.application_locator();
        LauncherScript {
            svp4: locator.locate(Application::Svp4),
            potplayer: locator.locate(Application::PotPlayer),
            venv: self.config.launcher.venv.as_deref().map(expand_home),
        }
    }
}

impl Command for LauncherCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !is_windows() {
            ui.warning("Writing a Windows batch file; copy it to the Windows machine to use it");
        }
        let script = self.script();
        for (app, found) in [
            (Application::Svp4, &script.svp4),
            (Application::PotPlayer, &script.potplayer),
        ] {
            if found.is_none() {
                ui.warning(&format!(
                    "{} not found; the launcher will skip it (download from {})",
                    app,
                    app.download_url()
                ));
            }
        }

        let writer = LauncherWriter::new(self.target_path()?).force(self.args.force);
        match writer.write(&script) {
            Ok(path) => {
                ui.success(&format!("Launcher written to {}", path.display()));
                ui.show_hint("In PotPlayer press F5 > Video > VapourSynth and enable it");
                Ok(CommandResult::success())
            }
            Err(VskitError::AlreadyExists { path }) => {
                ui.error(&format!("{} already exists", path.display()));
                ui.show_hint("Use --force to overwrite it");
                Ok(CommandResult::failure(1))
            }
            Err(e) => Err(e),
        }
    }
}
